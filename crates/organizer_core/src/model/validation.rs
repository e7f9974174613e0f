use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level validation failure raised before a record is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task or note title is blank after trim.
    EmptyTitle,
    /// Habit name is blank after trim.
    EmptyName,
    /// Habit target must be at least 1.
    ZeroTarget,
    /// Deadline text could not be parsed.
    InvalidDeadline(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be blank"),
            Self::EmptyName => write!(f, "habit name must not be blank"),
            Self::ZeroTarget => write!(f, "habit target must be positive"),
            Self::InvalidDeadline(value) => write!(
                f,
                "invalid deadline `{value}`; expected YYYY-MM-DD or YYYY-MM-DDTHH:MM"
            ),
        }
    }
}

impl Error for ValidationError {}
