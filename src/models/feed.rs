use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::feed::FeedEntry as DomainFeedEntry;

/// Row shape shared by the `notifications` and `updates` tables.
#[derive(Debug, Clone, Queryable)]
pub struct FeedEntry {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub is_read: bool,
    pub timestamp: NaiveDateTime,
}

impl From<FeedEntry> for DomainFeedEntry {
    fn from(value: FeedEntry) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            message: value.message,
            is_read: value.is_read,
            timestamp: value.timestamp,
        }
    }
}
