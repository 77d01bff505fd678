use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kinds of catalog items whose visits are recorded.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Product,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Product => "product",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "product" => Ok(ItemType::Product),
            other => Err(other.to_string()),
        }
    }
}

/// The last recorded visit of a user to one item.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Visit {
    pub id: i32,
    pub user_id: i32,
    pub item_id: i32,
    pub item_type: ItemType,
    pub timestamp: NaiveDateTime,
}

impl Visit {
    /// The visited item as a typed reference.
    pub fn target(&self) -> VisitTarget {
        match self.item_type {
            ItemType::Product => VisitTarget::Product(self.item_id),
        }
    }
}

/// Typed reference to the item a visit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitTarget {
    Product(i32),
}

/// Resolved summary of a visited item.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum VisitedItem {
    Product(ProductSnapshot),
}

/// Primitive-only product data shown next to a visit.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub title: String,
    /// Decimal price string, e.g. `"10.00"`.
    pub price: String,
    pub image: Option<String>,
}

/// Payload for recording a visit; the user always comes from the principal.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVisit {
    pub user_id: i32,
    pub item_id: i32,
    pub item_type: ItemType,
    pub timestamp: NaiveDateTime,
}
