use serde::Deserialize;
use validator::Validate;

use crate::domain::review::{NewReview, UpdateReview};
use crate::forms::{
    FieldErrors, FormResult, IdField, REQUIRED, optional_id, optional_text, required_text,
};

/// Maximum length allowed for a review comment.
const COMMENT_MAX_LEN: u64 = 4000;

/// Payload of a new review. The author always comes from the principal.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddReviewForm {
    #[serde(default)]
    pub product_id: IdField,
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    #[serde(default)]
    pub rating: Option<i32>,
    #[validate(length(max = COMMENT_MAX_LEN, message = "Comment is too long."))]
    #[serde(default)]
    pub comment: Option<String>,
}

impl AddReviewForm {
    /// Validates and sanitizes the payload into a domain `NewReview`.
    pub fn into_new_review(self, user_id: i32) -> FormResult<NewReview> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let product_id = self.product_id.check(&mut errors, "product_id", true);
        if self.rating.is_none() {
            errors.add("rating", REQUIRED);
        }
        let comment = required_text(&mut errors, "comment", self.comment.as_deref(), true);

        match (product_id, self.rating, comment) {
            (Some(product_id), Some(rating), Some(comment)) if errors.is_empty() => {
                Ok(NewReview::new(user_id, product_id, rating, comment))
            }
            _ => Err(errors),
        }
    }
}

/// Partial review update. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchReviewForm {
    #[serde(default)]
    pub product_id: IdField,
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    #[serde(default)]
    pub rating: Option<i32>,
    #[validate(length(max = COMMENT_MAX_LEN, message = "Comment is too long."))]
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub approved: Option<bool>,
}

impl PatchReviewForm {
    pub fn into_update_review(self) -> FormResult<UpdateReview> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let product_id = self.product_id.check(&mut errors, "product_id", false);
        let comment = optional_text(&mut errors, "comment", self.comment.as_deref(), true);

        errors.into_result(UpdateReview {
            product_id,
            rating: self.rating,
            comment,
            approved: self.approved,
        })
    }
}

/// Body of the "reviews by product" lookup.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewsByProductForm {
    #[serde(default, deserialize_with = "optional_id")]
    pub product_id: Option<i32>,
}

/// Body of the "reviews by user" lookup.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewsByUserForm {
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<i32>,
}
