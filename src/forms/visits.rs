use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::visit::{ItemType, NewVisit};
use crate::forms::{FieldErrors, FormResult, REQUIRED};

/// Payload for recording that the caller looked at an item.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RecordVisitForm {
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    #[serde(default)]
    pub item_id: Option<i32>,
    #[serde(default)]
    pub item_type: Option<String>,
    /// Client supplied instant; the server clock is used when absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RecordVisitForm {
    pub fn into_new_visit(self, user_id: i32, now: DateTime<Utc>) -> FormResult<NewVisit> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        if self.item_id.is_none() {
            errors.add("item_id", REQUIRED);
        }

        let item_type = match self.item_type.as_deref().map(str::trim) {
            None => {
                errors.add("item_type", REQUIRED);
                None
            }
            Some(raw) => match raw.parse::<ItemType>() {
                Ok(item_type) => Some(item_type),
                Err(_) => {
                    errors.add("item_type", format!("\"{raw}\" is not a valid choice."));
                    None
                }
            },
        };

        match (self.item_id, item_type) {
            (Some(item_id), Some(item_type)) if errors.is_empty() => Ok(NewVisit {
                user_id,
                item_id,
                item_type,
                timestamp: self.timestamp.unwrap_or(now).naive_utc(),
            }),
            _ => Err(errors),
        }
    }
}
