//! Cart and order submission types

mod types;

pub use types::{CartEntry, Order, OrderAck, OrderLine};
