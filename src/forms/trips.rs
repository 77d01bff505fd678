use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::trip::{NewTrip, UpdateTrip};
use crate::forms::{
    FieldErrors, FormResult, REQUIRED, optional_text, required_text, sanitize_multiline_text,
};

const TITLE_MAX_LEN: u64 = 200;
const DESTINATION_MAX_LEN: u64 = 200;
const NOTES_MAX_LEN: u64 = 4000;

/// Payload of a new trip for the caller.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddTripForm {
    #[validate(length(max = TITLE_MAX_LEN, message = "Title is too long."))]
    #[serde(default)]
    pub title: Option<String>,
    #[validate(length(max = DESTINATION_MAX_LEN, message = "Destination is too long."))]
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[validate(length(max = NOTES_MAX_LEN, message = "Notes are too long."))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl AddTripForm {
    pub fn into_new_trip(self, user_id: i32) -> FormResult<NewTrip> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let title = required_text(&mut errors, "title", self.title.as_deref(), false);
        let destination =
            required_text(&mut errors, "destination", self.destination.as_deref(), false);
        if self.date.is_none() {
            errors.add("date", REQUIRED);
        }
        let notes = self
            .notes
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|notes| !notes.is_empty());

        match (title, destination, self.date) {
            (Some(title), Some(destination), Some(date)) if errors.is_empty() => Ok(NewTrip {
                user_id,
                title,
                destination,
                date: date.naive_utc(),
                notes,
            }),
            _ => Err(errors),
        }
    }
}

/// Partial trip update. An empty `notes` string clears the notes.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditTripForm {
    #[validate(length(max = TITLE_MAX_LEN, message = "Title is too long."))]
    #[serde(default)]
    pub title: Option<String>,
    #[validate(length(max = DESTINATION_MAX_LEN, message = "Destination is too long."))]
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[validate(length(max = NOTES_MAX_LEN, message = "Notes are too long."))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl EditTripForm {
    pub fn into_update(self) -> FormResult<UpdateTrip> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let title = optional_text(&mut errors, "title", self.title.as_deref(), false);
        let destination =
            optional_text(&mut errors, "destination", self.destination.as_deref(), false);
        let notes = self.notes.as_deref().map(|notes| {
            Some(sanitize_multiline_text(notes)).filter(|notes| !notes.is_empty())
        });

        errors.into_result(UpdateTrip {
            title,
            destination,
            date: self.date.map(|date| date.naive_utc()),
            notes,
        })
    }
}
