//! Client error types

use shared::{ErrorCategory, ErrorCode};
use thiserror::Error;

/// Client error type
///
/// Every variant is recoverable: the caller shows the message and keeps
/// its state as it was.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Server returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Endpoint, waiter or table not configured
    #[error("{}", .0.message())]
    Config(ErrorCode),

    /// User input rejected before any state change
    #[error("{}", .0.message())]
    Validation(ErrorCode),

    /// Device not activated for menu access
    #[error("{}", .0.message())]
    Activation(ErrorCode),

    /// Durable storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Error code for the rendering layer
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Api { .. } => ErrorCode::UnexpectedStatus,
            Self::InvalidResponse(_) => ErrorCode::InvalidResponse,
            Self::Config(code) | Self::Validation(code) | Self::Activation(code) => *code,
            Self::Storage(_) | Self::Io(_) => ErrorCode::StorageError,
            Self::Serialization(_) => ErrorCode::CorruptValue,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Whether the failure happened on the wire (fetch, activation, submit)
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_categories() {
        let err = ClientError::Api {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.code(), ErrorCode::UnexpectedStatus);
        assert!(err.is_transport());

        let err = ClientError::Config(ErrorCode::EndpointMissing);
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.is_transport());

        let err = ClientError::Validation(ErrorCode::CustomerNameRequired);
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err = ClientError::Activation(ErrorCode::NotActivated);
        assert_eq!(err.category(), ErrorCategory::Activation);

        let err = ClientError::Storage("disk full".into());
        assert_eq!(err.category(), ErrorCategory::Storage);
    }

    #[test]
    fn test_error_display_uses_code_message() {
        let err = ClientError::Validation(ErrorCode::CustomerNameRequired);
        assert_eq!(err.to_string(), "Please enter a customer name.");

        let err = ClientError::Api {
            status: 404,
            body: "not here".into(),
        };
        assert_eq!(err.to_string(), "Server returned 404: not here");
    }
}
