//! Error code system shared by the client and its callers
//!
//! - [`ErrorCode`]: stable numeric codes the rendering layer can map to
//!   user-facing messages
//! - [`ErrorCategory`]: classification of codes into recovery classes
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Configuration errors (missing endpoint, waiter, table)
//! - 2xxx: Validation errors (customer name, cart, quantities)
//! - 3xxx: Transport errors (network, unexpected responses)
//! - 4xxx: Activation errors
//! - 5xxx: Storage errors
//!
//! None of these are fatal: every category is recovered by showing the
//! message and leaving state as it was.

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
