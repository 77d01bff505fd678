use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Public profile attached to a user account.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    pub id: i32,
    pub user_id: i32,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Stored image path; `None` when no image is set.
    pub image: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Patch data for a profile. Inner `None` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProfile {
    pub bio: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub image: Option<Option<String>>,
}

/// Account settings stored on the user row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Account {
    /// Full name, or the username when both name parts are blank.
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name, self.last_name);
        let full_name = full_name.trim();
        if full_name.is_empty() {
            self.username.clone()
        } else {
            full_name.to_string()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateAccount {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}
