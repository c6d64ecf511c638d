//! Waiter Client - ordering core for the waiter terminal
//!
//! Session store, menu cache, cart engine, order submission and the
//! device activation handshake against the POS backend.

pub mod activation;
pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod menu;
pub mod screen;
pub mod session;
pub mod store;
pub mod submission;
pub mod terminal;

#[cfg(test)]
mod testing;

pub use activation::{ACTIVATION_SUCCESS, ActivationResult};
pub use cart::Cart;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{Endpoint, HttpClient, NetworkHttpClient};
pub use menu::{MenuCache, MenuFilter};
pub use screen::{Screen, ScreenEvent};
pub use session::{Session, SessionStore};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use terminal::{MenuRow, MenuView, NetworkTerminal, WaiterTerminal};

// Re-export shared types for convenience
pub use shared::{Category, CategoryFilter, ErrorCategory, ErrorCode, MenuItem, Order, OrderAck};
