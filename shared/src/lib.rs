//! Shared types for the waiter ordering client
//!
//! Wire and domain types used by the client crate and by anything that
//! talks to the ordering backend: menu items, cart entries, the order
//! submission payload, and the error code/category system.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCategory, ErrorCode};
pub use models::{Category, CategoryFilter, MenuItem, RemoteMenuItem, category_of};
pub use order::{CartEntry, Order, OrderAck, OrderLine};
