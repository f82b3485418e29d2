use std::fmt::{self, Display};

/// Why a predicate could not be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownReason {
    /// An operand failed the toxic check.
    ToxicInput,
    /// An operand has nothing the engine can represent.
    UnsupportedInput,
    /// The engine reported an error.
    EngineFailure,
}

/// Answer of a spatial predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tristate {
    True,
    False,
    Unknown(UnknownReason),
}

impl Tristate {
    /// SQL view: `Unknown` becomes NULL.
    pub fn as_sql(self) -> Option<bool> {
        match self {
            Tristate::True => Some(true),
            Tristate::False => Some(false),
            Tristate::Unknown(_) => None,
        }
    }

    /// 1 for true, 0 for false, -1 for unknown.
    pub fn to_legacy_int(self) -> i32 {
        match self {
            Tristate::True => 1,
            Tristate::False => 0,
            Tristate::Unknown(_) => -1,
        }
    }

    pub fn is_true(self) -> bool {
        self == Tristate::True
    }

    pub fn is_false(self) -> bool {
        self == Tristate::False
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, Tristate::Unknown(_))
    }

    pub fn unknown_reason(self) -> Option<UnknownReason> {
        match self {
            Tristate::Unknown(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<bool> for Tristate {
    fn from(value: bool) -> Self {
        if value {
            Tristate::True
        } else {
            Tristate::False
        }
    }
}

impl Display for Tristate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tristate::True => write!(f, "TRUE"),
            Tristate::False => write!(f, "FALSE"),
            Tristate::Unknown(reason) => write!(f, "UNKNOWN ({:?})", reason),
        }
    }
}
