//! Core Error Types

use thiserror::Error;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by local validation of model values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A score fell outside its allowed range
    #[error("{field} must be between {min} and {max}, got {value}")]
    ScoreOutOfRange {
        field: String,
        value: u8,
        min: u8,
        max: u8,
    },

    /// A required field was empty
    #[error("{field} is required")]
    MissingField { field: String },

    /// An enum value could not be parsed
    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: String, value: String },
}

impl CoreError {
    /// Create a score range error
    pub fn score_out_of_range(field: impl Into<String>, value: u8, min: u8, max: u8) -> Self {
        CoreError::ScoreOutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    /// Create a missing field error
    pub fn missing(field: impl Into<String>) -> Self {
        CoreError::MissingField {
            field: field.into(),
        }
    }

    /// Create an unknown variant error
    pub fn unknown(kind: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::UnknownVariant {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_error_message() {
        let err = CoreError::score_out_of_range("npsScore", 11, 1, 10);
        assert_eq!(err.to_string(), "npsScore must be between 1 and 10, got 11");
    }

    #[test]
    fn test_missing_field_message() {
        let err = CoreError::missing("name");
        assert!(err.to_string().contains("name"));
    }
}
