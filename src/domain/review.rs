use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Minimal product reference embedded into a review.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReviewProduct {
    pub id: i32,
    pub title: String,
}

/// Display data about the author of a review.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ReviewAuthor {
    /// Full name, falling back to the username when both name parts are blank.
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

/// Domain representation of a product review.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    /// Authoring user; owner of the record.
    pub user_id: i32,
    pub product_id: Option<i32>,
    pub rating: i32,
    pub comment: String,
    /// Set by staff moderation; new reviews start unapproved.
    pub approved: bool,
    pub created_at: NaiveDateTime,
    pub product: Option<ReviewProduct>,
    pub author: ReviewAuthor,
}

/// Payload required to insert a new review.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub user_id: i32,
    pub product_id: i32,
    pub rating: i32,
    pub comment: String,
}

impl NewReview {
    pub fn new(user_id: i32, product_id: i32, rating: i32, comment: impl Into<String>) -> Self {
        Self {
            user_id,
            product_id,
            rating,
            comment: comment.into(),
        }
    }
}

/// Partial update applied to an existing review.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReview {
    pub product_id: Option<i32>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub approved: Option<bool>,
}

impl UpdateReview {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.rating.is_none()
            && self.comment.is_none()
            && self.approved.is_none()
    }
}

/// Query definition used to list reviews, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewListQuery {
    /// Restrict to reviews written by this user.
    pub user_id: Option<i32>,
    /// Restrict to reviews of this product.
    pub product_id: Option<i32>,
    /// Only return approved reviews.
    pub approved_only: bool,
}

impl ReviewListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn product(mut self, product_id: i32) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn approved_only(mut self) -> Self {
        self.approved_only = true;
        self
    }
}
