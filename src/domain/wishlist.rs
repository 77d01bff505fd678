use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// A product saved by a user. At most one entry exists per (user, product).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WishlistEntry {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub created_at: NaiveDateTime,
    pub product: Option<Product>,
}

/// Outcome of an idempotent wishlist insert.
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistInsert {
    /// A new entry was stored.
    Created(WishlistEntry),
    /// The pair was already present; nothing was written.
    Existing(WishlistEntry),
}

impl WishlistInsert {
    pub fn entry(&self) -> &WishlistEntry {
        match self {
            WishlistInsert::Created(entry) | WishlistInsert::Existing(entry) => entry,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, WishlistInsert::Created(_))
    }
}
