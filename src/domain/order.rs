use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Status given to orders created without an explicit one.
pub const DEFAULT_ORDER_STATUS: &str = "Pending";

/// Domain representation of an order placed by a user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub product_id: Option<i32>,
    pub quantity: i32,
    /// Total amount in the smallest currency unit.
    pub total_cents: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i32,
    pub product_id: Option<i32>,
    pub quantity: i32,
    pub total_cents: i64,
    pub status: String,
}

impl NewOrder {
    pub fn new(user_id: i32, product_id: Option<i32>, quantity: i32, total_cents: i64) -> Self {
        Self {
            user_id,
            product_id,
            quantity,
            total_cents,
            status: DEFAULT_ORDER_STATUS.to_string(),
        }
    }
}

/// Patch data applied when updating an existing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOrder {
    pub quantity: Option<i32>,
    pub total_cents: Option<i64>,
    pub status: Option<String>,
}
