//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or empty
    Empty { field: &'static str },

    /// Field exceeds maximum length (in characters)
    TooLong { field: &'static str, max: usize },

    /// Value doesn't have the required shape (e.g., non-positive id)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::InvalidFormat { field, .. } => *field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} can't be blank", field),
            Self::TooLong { field, max } => {
                write!(f, "{} is too long (maximum is {} characters)", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
