//! Data models
//!
//! Menu catalog types shared between the cache, the cart and the backend.

pub mod menu;

pub use menu::{Category, CategoryFilter, InvalidCategory, MenuItem, RemoteMenuItem, category_of};
