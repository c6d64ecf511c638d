//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category, derived from the leading digit of the error code
///
/// - 0xxx: General
/// - 1xxx: Configuration
/// - 2xxx: Validation
/// - 3xxx: Transport
/// - 4xxx: Activation
/// - 5xxx: Storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    /// Missing endpoint or waiter id; recovered by prompting re-entry
    Configuration,
    /// Bad user input; blocks the action, no state change
    Validation,
    /// Fetch/activation/submit failure; recovered locally
    Transport,
    Activation,
    Storage,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::Configuration,
            2000..3000 => Self::Validation,
            3000..4000 => Self::Transport,
            4000..5000 => Self::Activation,
            5000..6000 => Self::Storage,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Activation => "activation",
            Self::Storage => "storage",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Configuration);
        assert_eq!(ErrorCategory::from_code(2999), ErrorCategory::Validation);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Transport);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Activation);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Storage);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::General);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::EndpointMissing.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            ErrorCode::CustomerNameRequired.category(),
            ErrorCategory::Validation
        );
        assert_eq!(ErrorCode::NetworkError.category(), ErrorCategory::Transport);
        assert_eq!(
            ErrorCode::ActivationRejected.category(),
            ErrorCategory::Activation
        );
        assert_eq!(ErrorCode::CorruptValue.category(), ErrorCategory::Storage);
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::Configuration).unwrap();
        assert_eq!(json, "\"configuration\"");
    }
}
