//! Cart engine
//!
//! Merge rules for the waiter's selections. A [`Cart`] is an immutable
//! snapshot: every operation returns a new cart and leaves the receiver
//! untouched, so a view rendered from an older snapshot is never torn.
//!
//! Lines are keyed by `(code, note)`. Adding the same item with the same
//! note grows the existing line; any difference in the note text starts a
//! new line.

use std::sync::Arc;

use shared::{CartEntry, ErrorCode, MenuItem};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Arc<Vec<CartEntry>>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn with_entries(entries: Vec<CartEntry>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Add `qty` of `item` with `note`, merging into an identical line
    pub fn add_or_merge(&self, item: &MenuItem, note: &str, qty: u32) -> ClientResult<Cart> {
        if qty == 0 {
            return Err(ClientError::Validation(ErrorCode::InvalidQuantity));
        }

        let mut entries = self.entries.to_vec();
        match entries.iter_mut().find(|e| e.is_line(&item.code, note)) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(qty)
                    .ok_or(ClientError::Validation(ErrorCode::InvalidQuantity))?;
            }
            None => entries.push(CartEntry::new(item.clone(), qty, note)),
        }
        Ok(Self::with_entries(entries))
    }

    /// Remove one unit of `code`
    ///
    /// When several lines share the code (different notes) the most
    /// recently created line is decremented. A line reaching zero is
    /// dropped. Unknown codes leave the cart as it is.
    pub fn decrement(&self, code: &str) -> Cart {
        let Some(idx) = self.entries.iter().rposition(|e| e.code() == code) else {
            return self.clone();
        };

        let mut entries = self.entries.to_vec();
        if entries[idx].quantity > 1 {
            entries[idx].quantity -= 1;
        } else {
            entries.remove(idx);
        }
        Self::with_entries(entries)
    }

    /// Nudge the quantity of the line at `index` by `delta`, never below 1
    ///
    /// Used on the review screen, where lines are edited in place rather
    /// than removed.
    pub fn adjust_line(&self, index: usize, delta: i64) -> ClientResult<Cart> {
        if index >= self.entries.len() {
            return Err(ClientError::Validation(ErrorCode::ItemNotFound));
        }

        let mut entries = self.entries.to_vec();
        let line = &mut entries[index];
        let adjusted = (i64::from(line.quantity) + delta).clamp(1, i64::from(u32::MAX));
        line.quantity = adjusted as u32;
        Ok(Self::with_entries(entries))
    }

    /// Sum of all line quantities, saturating at `u32::MAX`
    pub fn total_quantity(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(e.quantity))
    }

    /// Units of `code` across all of its lines
    pub fn quantity_for_code(&self, code: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.code() == code)
            .fold(0u32, |acc, e| acc.saturating_add(e.quantity))
    }

    pub fn clear(&self) -> Cart {
        Cart::new()
    }
}
