use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The two per-user feeds. They share a shape but live in separate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Notification,
    Update,
}

impl FeedKind {
    /// Human readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            FeedKind::Notification => "Notification",
            FeedKind::Update => "Update",
        }
    }
}

/// A notification or update addressed to one user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeedEntry {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub is_read: bool,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedEntry {
    pub user_id: i32,
    pub message: String,
}

impl NewFeedEntry {
    pub fn new(user_id: i32, message: impl Into<String>) -> Self {
        Self {
            user_id,
            message: message.into(),
        }
    }
}

/// Partial update of a feed entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateFeedEntry {
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

impl UpdateFeedEntry {
    /// Patch that only flips the read flag on.
    pub fn mark_read() -> Self {
        Self {
            message: None,
            is_read: Some(true),
        }
    }
}
