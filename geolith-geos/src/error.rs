//! Error types of the engine layer.

use geolith::errors::{ErrorKind, GeoError};
use thiserror::Error;

/// Errors raised while converting to or evaluating with the geometry engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("GEOS error: {0}")]
    Geos(#[from] geos::Error),

    #[error("Geometry error: {0}")]
    Model(#[from] GeoError),

    #[error("Toxic geometry: {0}")]
    Toxic(String),

    #[error("Unsupported geometry: {0}")]
    Unsupported(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<EngineError> for GeoError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Model(inner) => inner,
            EngineError::Geos(geos_err) => GeoError::new(
                &format!("GEOS error: {}", geos_err),
                ErrorKind::Extension("geos".to_string()),
            ),
            EngineError::Toxic(msg) => GeoError::new(&msg, ErrorKind::InvalidGeometry),
            EngineError::Unsupported(msg) => GeoError::new(&msg, ErrorKind::InvalidOperation),
            EngineError::InvalidArgument(msg) => GeoError::new(&msg, ErrorKind::InvalidArgument),
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
