//! Error types for the palette pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Structural input errors raised by the core. None of them are retryable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThemeError {
    /// A channel, packed value or hex string is outside the valid color range.
    #[error("color out of range: {message}")]
    Domain { message: String },

    /// The pixel grid is empty or not rectangular.
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    /// A configuration value was rejected during validation.
    #[error("invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl ThemeError {
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            ThemeError::domain("channel 300").to_string(),
            "color out of range: channel 300"
        );
        assert_eq!(
            ThemeError::invalid_image("zero rows").to_string(),
            "invalid image: zero rows"
        );
        assert_eq!(
            ThemeError::invalid_parameter("max_diff", -1.0).to_string(),
            "invalid parameter: max_diff = -1"
        );
    }
}
