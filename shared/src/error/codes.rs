//! Error codes
//!
//! Codes are grouped by leading digit, see [`super::ErrorCategory`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Represented as u16 on the wire so the rendering layer can look up a
/// localized message without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Unexpected internal error
    InternalError = 2,

    // ==================== 1xxx: Configuration ====================
    /// Backend endpoint has not been configured
    EndpointMissing = 1001,
    /// Waiter code has not been configured
    WaiterMissing = 1002,
    /// Table number has not been entered
    TableMissing = 1003,

    // ==================== 2xxx: Validation ====================
    /// Generic validation failure
    ValidationFailed = 2001,
    /// Customer name is blank
    CustomerNameRequired = 2002,
    /// Cart has no entries
    CartEmpty = 2003,
    /// Table number is not an integer
    InvalidTableNumber = 2004,
    /// Quantity must be at least one
    InvalidQuantity = 2005,
    /// Menu item code is not in the menu
    ItemNotFound = 2006,
    /// Action is not allowed on the current screen
    InvalidTransition = 2007,

    // ==================== 3xxx: Transport ====================
    /// Request could not be completed
    NetworkError = 3001,
    /// Backend answered with a non-success status
    UnexpectedStatus = 3002,
    /// Backend answered with a body that could not be decoded
    InvalidResponse = 3003,

    // ==================== 4xxx: Activation ====================
    /// Device has not been activated
    NotActivated = 4001,
    /// Backend rejected the activation request
    ActivationRejected = 4002,

    // ==================== 5xxx: Storage ====================
    /// Durable storage could not be read or written
    StorageError = 5001,
    /// Stored value could not be decoded
    CorruptValue = 5002,
}

impl ErrorCode {
    /// Numeric value of the code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether the code means success
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Default English message for the code
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "An unknown error occurred",
            Self::InternalError => "Internal error",
            Self::EndpointMissing => "Server IP is not set. Please configure it.",
            Self::WaiterMissing => "Waiter code is not set. Please configure it.",
            Self::TableMissing => "Please enter a table number",
            Self::ValidationFailed => "Validation failed",
            Self::CustomerNameRequired => "Please enter a customer name.",
            Self::CartEmpty => "The order has no items",
            Self::InvalidTableNumber => "Table number must be a whole number",
            Self::InvalidQuantity => "Quantity must be at least 1",
            Self::ItemNotFound => "Menu item not found",
            Self::InvalidTransition => "Action not available on this screen",
            Self::NetworkError => "Network request failed",
            Self::UnexpectedStatus => "Server returned an error",
            Self::InvalidResponse => "Server returned an invalid response",
            Self::NotActivated => "This device has not been activated",
            Self::ActivationRejected => "Activation was rejected",
            Self::StorageError => "Storage error",
            Self::CorruptValue => "Stored value is corrupt",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a u16 does not name an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::InternalError),
            1001 => Ok(Self::EndpointMissing),
            1002 => Ok(Self::WaiterMissing),
            1003 => Ok(Self::TableMissing),
            2001 => Ok(Self::ValidationFailed),
            2002 => Ok(Self::CustomerNameRequired),
            2003 => Ok(Self::CartEmpty),
            2004 => Ok(Self::InvalidTableNumber),
            2005 => Ok(Self::InvalidQuantity),
            2006 => Ok(Self::ItemNotFound),
            2007 => Ok(Self::InvalidTransition),
            3001 => Ok(Self::NetworkError),
            3002 => Ok(Self::UnexpectedStatus),
            3003 => Ok(Self::InvalidResponse),
            4001 => Ok(Self::NotActivated),
            4002 => Ok(Self::ActivationRejected),
            5001 => Ok(Self::StorageError),
            5002 => Ok(Self::CorruptValue),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
