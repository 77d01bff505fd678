use serde::Deserialize;
use validator::Validate;

use crate::domain::feed::{NewFeedEntry, UpdateFeedEntry};
use crate::forms::{FieldErrors, FormResult, optional_text, required_text};

const MESSAGE_MAX_LEN: u64 = 2000;

/// Payload of a new notification or update for the caller.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddFeedEntryForm {
    #[validate(length(max = MESSAGE_MAX_LEN, message = "Message is too long."))]
    #[serde(default)]
    pub message: Option<String>,
}

impl AddFeedEntryForm {
    pub fn into_new_entry(self, user_id: i32) -> FormResult<NewFeedEntry> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let message = required_text(&mut errors, "message", self.message.as_deref(), true);

        match message {
            Some(message) if errors.is_empty() => Ok(NewFeedEntry::new(user_id, message)),
            _ => Err(errors),
        }
    }
}

/// Full or partial edit of a feed entry.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditFeedEntryForm {
    #[validate(length(max = MESSAGE_MAX_LEN, message = "Message is too long."))]
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

impl EditFeedEntryForm {
    pub fn into_update(self) -> FormResult<UpdateFeedEntry> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let message = optional_text(&mut errors, "message", self.message.as_deref(), true);

        errors.into_result(UpdateFeedEntry {
            message,
            is_read: self.is_read,
        })
    }
}
