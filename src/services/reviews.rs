use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::auth::Principal;
use crate::domain::review::{Review, ReviewListQuery, ReviewProduct};
use crate::forms::FieldErrors;
use crate::forms::reviews::{AddReviewForm, PatchReviewForm};
use crate::repository::{ProductReader, ReviewReader, ReviewWriter};
use crate::services::access::{Action, ReviewScope, authorize, review_scope};
use crate::services::{ServiceError, ServiceResult};

/// Wire representation of a review with its author's display data.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewView {
    pub id: i32,
    pub user: i32,
    pub product: Option<ReviewProduct>,
    pub rating: i32,
    pub comment: String,
    pub approved: bool,
    pub created_at: NaiveDateTime,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "ProfileImage")]
    pub profile_image: Option<String>,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            user: review.user_id,
            product: review.product,
            rating: review.rating,
            comment: review.comment,
            approved: review.approved,
            created_at: review.created_at,
            name: review.author.name,
            email: review.author.email,
            profile_image: review.author.profile_image,
        }
    }
}

fn views(reviews: Vec<Review>) -> Vec<ReviewView> {
    reviews.into_iter().map(ReviewView::from).collect()
}

/// Staff see every review, everyone else only their own.
pub fn list_reviews<R>(repo: &R, principal: &Principal) -> ServiceResult<Vec<ReviewView>>
where
    R: ReviewReader + ?Sized,
{
    let query = match review_scope(principal) {
        ReviewScope::All => ReviewListQuery::new(),
        ReviewScope::OwnedBy(user_id) => ReviewListQuery::new().user(user_id),
    };

    repo.list_reviews(query).map(views).map_err(ServiceError::from)
}

/// Approved reviews of one product, newest first.
pub fn reviews_by_product<R>(repo: &R, product_id: Option<i32>) -> ServiceResult<Vec<ReviewView>>
where
    R: ReviewReader + ?Sized,
{
    let Some(product_id) = product_id else {
        return Err(ServiceError::Invalid("product_id is required.".to_string()));
    };

    repo.list_reviews(ReviewListQuery::new().product(product_id).approved_only())
        .map(views)
        .map_err(ServiceError::from)
}

/// Reviews written by one user. The author and staff also see unapproved ones.
pub fn reviews_by_user<R>(
    repo: &R,
    principal: &Principal,
    user_id: Option<i32>,
) -> ServiceResult<Vec<ReviewView>>
where
    R: ReviewReader + ?Sized,
{
    let Some(user_id) = user_id else {
        return Err(ServiceError::Invalid("user_id is required".to_string()));
    };

    let mut query = ReviewListQuery::new().user(user_id);
    if !principal.is_staff && principal.user_id != user_id {
        query = query.approved_only();
    }

    repo.list_reviews(query).map(views).map_err(ServiceError::from)
}

fn missing_product(product_id: i32) -> FieldErrors {
    FieldErrors::single(
        "product_id",
        format!("Invalid pk \"{product_id}\" - object does not exist."),
    )
}

/// Stores a new unapproved review authored by the principal.
pub fn create_review<R>(
    repo: &R,
    principal: &Principal,
    form: AddReviewForm,
) -> ServiceResult<ReviewView>
where
    R: ReviewWriter + ProductReader + ?Sized,
{
    let new_review = form.into_new_review(principal.user_id)?;

    if repo
        .get_product_by_id(new_review.product_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(missing_product(new_review.product_id).into());
    }

    repo.create_review(&new_review)
        .map(ReviewView::from)
        .map_err(ServiceError::from)
}

/// Partial update of a review by its author or by staff.
///
/// Nothing is written unless the principal may edit the review, may change
/// the approval flag when it is present, and every supplied field is valid.
pub fn patch_review<R>(
    repo: &R,
    principal: &Principal,
    review_id: i32,
    form: PatchReviewForm,
) -> ServiceResult<ReviewView>
where
    R: ReviewReader + ReviewWriter + ProductReader + ?Sized,
{
    let review = repo
        .get_review_by_id(review_id)
        .map_err(ServiceError::from)?
        .ok_or_else(ServiceError::not_found)?;

    authorize(principal, Action::Edit, &review).into_result(ServiceError::not_found)?;

    let updates = form.into_update_review()?;

    if updates.approved.is_some_and(|approved| approved != review.approved) {
        authorize(principal, Action::Moderate, &review).into_result(ServiceError::not_found)?;
    }

    if let Some(product_id) = updates.product_id {
        if repo
            .get_product_by_id(product_id)
            .map_err(ServiceError::from)?
            .is_none()
        {
            return Err(missing_product(product_id).into());
        }
    }

    repo.update_review(review_id, &updates)
        .map(ReviewView::from)
        .map_err(ServiceError::from)
}
