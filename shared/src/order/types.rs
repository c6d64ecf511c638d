//! Shared types for cart lines and the order payload

use crate::models::{Category, MenuItem};
use serde::{Deserialize, Serialize};

// ============================================================================
// Cart Entry
// ============================================================================

/// One cart line
///
/// Two lines are the same line iff both the item code and the note match
/// exactly (case-sensitive, empty note included). `quantity` is never 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Item snapshot taken when the line was created
    pub item: MenuItem,
    pub quantity: u32,
    /// Free-text kitchen note ("no ice", "extra spicy")
    #[serde(default)]
    pub note: String,
}

impl CartEntry {
    pub fn new(item: MenuItem, quantity: u32, note: impl Into<String>) -> Self {
        Self {
            item,
            quantity,
            note: note.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.item.code
    }

    /// Whether this line has the merge key `(code, note)`
    pub fn is_line(&self, code: &str, note: &str) -> bool {
        self.item.code == code && self.note == note
    }
}

// ============================================================================
// Order Payload
// ============================================================================

/// One line of the submitted order (`orderDetails[]` on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub code: String,
    pub full_name: String,
    /// Category captured when the item was put in the cart
    pub category: Category,
    pub category_type: String,
    pub note: String,
    pub quantity: u32,
}

impl From<&CartEntry> for OrderLine {
    fn from(entry: &CartEntry) -> Self {
        Self {
            code: entry.item.code.clone(),
            full_name: entry.item.full_name.clone(),
            category: entry.item.category,
            category_type: entry.item.category_type.clone(),
            note: entry.note.clone(),
            quantity: entry.quantity,
        }
    }
}

/// Order submission payload for `POST /order/save`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "waiterCode")]
    pub waiter_id: String,
    pub table_number: i64,
    pub customer_name: String,
    #[serde(rename = "orderDetails")]
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Total number of units across all lines
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }
}

/// Acknowledgement of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    /// Raw response body from the backend (may be empty)
    pub message: String,
    /// Client-side receipt time (Unix millis)
    pub received_at: i64,
}

impl OrderAck {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            received_at: crate::util::now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(code: &str, name: &str) -> MenuItem {
        MenuItem::new(1, code, name, "portion")
    }

    #[test]
    fn test_cart_entry_line_identity() {
        let entry = CartEntry::new(item("1001", "Nasi Goreng"), 2, "");
        assert!(entry.is_line("1001", ""));
        assert!(!entry.is_line("1001", " "));
        assert!(!entry.is_line("1002", ""));

        let noted = CartEntry::new(item("1001", "Nasi Goreng"), 1, "No Ice");
        assert!(noted.is_line("1001", "No Ice"));
        assert!(!noted.is_line("1001", "no ice"));
    }

    #[test]
    fn test_order_wire_format() {
        let entry = CartEntry::new(item("2001", "Es Jeruk"), 3, "less sugar");
        let order = Order {
            waiter_id: "W01".to_string(),
            table_number: 12,
            customer_name: "Budi".to_string(),
            lines: vec![OrderLine::from(&entry)],
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "waiterCode": "W01",
                "tableNumber": 12,
                "customerName": "Budi",
                "orderDetails": [{
                    "code": "2001",
                    "fullName": "Es Jeruk",
                    "category": "Beverage",
                    "categoryType": "portion",
                    "note": "less sugar",
                    "quantity": 3
                }]
            })
        );
        assert_eq!(order.total_quantity(), 3);
    }

    #[test]
    fn test_order_line_keeps_captured_category() {
        let mut stale = item("1001", "Renamed");
        stale.category = Category::Others;
        let line = OrderLine::from(&CartEntry::new(stale, 1, ""));
        assert_eq!(line.category, Category::Others);
    }

    #[test]
    fn test_order_total_saturates() {
        let order = Order {
            waiter_id: "W01".to_string(),
            table_number: 1,
            customer_name: "Budi".to_string(),
            lines: vec![
                OrderLine::from(&CartEntry::new(item("1001", "Nasi Goreng"), u32::MAX, "")),
                OrderLine::from(&CartEntry::new(item("2001", "Es Jeruk"), 5, "")),
            ],
        };
        assert_eq!(order.total_quantity(), u32::MAX);
    }
}
