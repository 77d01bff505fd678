use serde::Deserialize;
use validator::Validate;

use crate::domain::profile::{UpdateAccount, UpdateProfile};
use crate::forms::{
    FieldErrors, FormResult, optional_text, sanitize_inline_text, sanitize_multiline_text,
};

const BIO_MAX_LEN: u64 = 2000;
const LOCATION_MAX_LEN: u64 = 200;
const IMAGE_MAX_LEN: u64 = 512;
const NAME_MAX_LEN: u64 = 150;

/// Profile edit. A supplied empty string clears the field.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProfileForm {
    #[validate(length(max = BIO_MAX_LEN, message = "Bio is too long."))]
    #[serde(default)]
    pub bio: Option<String>,
    #[validate(length(max = LOCATION_MAX_LEN, message = "Location is too long."))]
    #[serde(default)]
    pub location: Option<String>,
    /// Stored image path.
    #[validate(length(max = IMAGE_MAX_LEN, message = "Image path is too long."))]
    #[serde(default)]
    pub image: Option<String>,
}

/// `Some(None)` for a supplied blank value, which clears the stored one.
fn clearable(value: Option<String>, sanitize: fn(&str) -> String) -> Option<Option<String>> {
    value.map(|value| Some(sanitize(&value)).filter(|value| !value.is_empty()))
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

impl EditProfileForm {
    pub fn into_update(self) -> FormResult<UpdateProfile> {
        if let Err(err) = self.validate() {
            return Err(FieldErrors::from(err));
        }

        Ok(UpdateProfile {
            bio: clearable(self.bio, sanitize_multiline_text),
            location: clearable(self.location, sanitize_inline_text),
            image: clearable(self.image, trimmed),
        })
    }
}

/// Account settings edit.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditAccountForm {
    #[validate(length(max = NAME_MAX_LEN, message = "Username is too long."))]
    #[serde(default)]
    pub username: Option<String>,
    #[validate(length(max = NAME_MAX_LEN, message = "First name is too long."))]
    #[serde(default)]
    pub first_name: Option<String>,
    #[validate(length(max = NAME_MAX_LEN, message = "Last name is too long."))]
    #[serde(default)]
    pub last_name: Option<String>,
    #[validate(email(message = "Enter a valid email address."))]
    #[serde(default)]
    pub email: Option<String>,
}

impl EditAccountForm {
    pub fn into_update(self) -> FormResult<UpdateAccount> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let username = optional_text(&mut errors, "username", self.username.as_deref(), false);

        errors.into_result(UpdateAccount {
            username,
            first_name: self.first_name.as_deref().map(sanitize_inline_text),
            last_name: self.last_name.as_deref().map(sanitize_inline_text),
            email: self.email.map(|email| email.trim().to_lowercase()),
        })
    }
}
