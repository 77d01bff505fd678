use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A trip planned or taken by a user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Trip {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub destination: String,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub user_id: i32,
    pub title: String,
    pub destination: String,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
}

/// Patch data for a trip. `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTrip {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub notes: Option<Option<String>>,
}

/// Query definition used to list a user's trips.
#[derive(Debug, Clone, PartialEq)]
pub struct TripListQuery {
    pub user_id: i32,
    /// Only trips dated strictly before this instant.
    pub before: Option<NaiveDateTime>,
}

impl TripListQuery {
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            before: None,
        }
    }

    pub fn before(mut self, instant: NaiveDateTime) -> Self {
        self.before = Some(instant);
        self
    }
}
