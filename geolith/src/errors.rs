use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::{atomic, Atomic, ReadExecutor};

/// Error kinds for geometry operations.
///
/// Each kind names one category of failure so callers can tell malformed input
/// apart from engine trouble or plain misuse of the model API.
///
/// # Examples
///
/// ```rust
/// use geolith::errors::{ErrorKind, GeoError, GeoResult};
///
/// fn example() -> GeoResult<()> {
///     Err(GeoError::new("vertex 7 out of range", ErrorKind::IndexOutOfBounds))
/// }
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::IndexOutOfBounds);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Model Errors
    /// A vertex, element or ring index is out of range
    IndexOutOfBounds,
    /// A dimension-specific accessor or substructure does not match the owning dimension model
    DimensionMismatch,
    /// The geometry is structurally unusable for the requested operation
    InvalidGeometry,
    /// The geometry has no points, linestrings or polygons
    EmptyGeometry,

    // Blob Errors
    /// The blob ended before the declared payload did
    TruncatedBlob,
    /// A marker, count or length in the blob is inconsistent
    MalformedBlob,
    /// The blob carries a class or entity type that is not recognized
    UnknownTypeMarker,
    /// Error encoding data
    EncodingError,

    // Operation Errors
    /// An argument is outside its valid domain
    InvalidArgument,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// The computational-geometry engine failed
    EngineError,

    // Extension Errors - the String names the extension (e.g. "geos")
    /// Error from an extension crate
    Extension(String),

    // Generic/Internal Errors
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::IndexOutOfBounds => write!(f, "Index out of bounds"),
            ErrorKind::DimensionMismatch => write!(f, "Dimension mismatch"),
            ErrorKind::InvalidGeometry => write!(f, "Invalid geometry"),
            ErrorKind::EmptyGeometry => write!(f, "Empty geometry"),
            ErrorKind::TruncatedBlob => write!(f, "Truncated blob"),
            ErrorKind::MalformedBlob => write!(f, "Malformed blob"),
            ErrorKind::UnknownTypeMarker => write!(f, "Unknown type marker"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::EngineError => write!(f, "Engine error"),
            ErrorKind::Extension(name) => write!(f, "{} error", name),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Geometry error type.
///
/// `GeoError` carries a message, an [`ErrorKind`], an optional cause and the
/// backtrace captured where it was created.
///
/// # Examples
///
/// ```rust
/// use geolith::errors::{ErrorKind, GeoError};
///
/// let cause = GeoError::new("blob ended at byte 40", ErrorKind::TruncatedBlob);
/// let err = GeoError::new_with_cause("cannot decode geometry", ErrorKind::MalformedBlob, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct GeoError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<GeoError>>,
    backtrace: Atomic<Backtrace>,
}

impl GeoError {
    /// Creates a new `GeoError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        GeoError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `GeoError` that wraps `cause`.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: GeoError) -> Self {
        GeoError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&GeoError> {
        self.cause.as_deref()
    }

    /// Shorthand for an out-of-range index on a structure of `len` items.
    pub fn index_out_of_bounds(what: &str, index: usize, len: usize) -> Self {
        GeoError::new(
            &format!("{} index {} out of range (len {})", what, index, len),
            ErrorKind::IndexOutOfBounds,
        )
    }
}

impl Display for GeoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for GeoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => self
                .backtrace
                .read_with(|bt| write!(f, "{}\n{:?}", self.message, bt)),
        }
    }
}

impl Error for GeoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for geometry operations.
pub type GeoResult<T> = Result<T, GeoError>;

#[cfg(feature = "serde")]
impl serde::de::Error for GeoError {
    fn custom<T: Display>(msg: T) -> Self {
        GeoError::new(&msg.to_string(), ErrorKind::EncodingError)
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for GeoError {
    fn custom<T: Display>(msg: T) -> Self {
        GeoError::new(&msg.to_string(), ErrorKind::EncodingError)
    }
}

impl From<std::io::Error> for GeoError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::UnexpectedEof => ErrorKind::TruncatedBlob,
            _ => ErrorKind::EncodingError,
        };
        GeoError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<std::fmt::Error> for GeoError {
    fn from(err: std::fmt::Error) -> Self {
        GeoError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<String> for GeoError {
    fn from(msg: String) -> Self {
        GeoError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for GeoError {
    fn from(msg: &str) -> Self {
        GeoError::new(msg, ErrorKind::InternalError)
    }
}
