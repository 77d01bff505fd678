use actix_web::{HttpResponse, Responder, get, patch, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::reviews::{
    AddReviewForm, PatchReviewForm, ReviewsByProductForm, ReviewsByUserForm,
};
use crate::repository::DieselRepository;
use crate::routes::{error_response, principal};
use crate::services::reviews;

/// Staff see every review; other users see their own.
#[get("/reviews/")]
pub async fn list_reviews(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    reviews_for(&user, &repo)
}

#[get("/reviews/manage/")]
pub async fn manage_reviews(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    reviews_for(&user, &repo)
}

fn reviews_for(user: &AuthenticatedUser, repo: &DieselRepository) -> HttpResponse {
    let principal = match principal(user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match reviews::list_reviews(repo, &principal) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => error_response(err, "list reviews"),
    }
}

#[post("/reviews/")]
pub async fn add_review(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddReviewForm>,
) -> impl Responder {
    create(&user, &repo, form.into_inner())
}

#[post("/reviews/manage/")]
pub async fn add_review_alias(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddReviewForm>,
) -> impl Responder {
    create(&user, &repo, form.into_inner())
}

fn create(user: &AuthenticatedUser, repo: &DieselRepository, form: AddReviewForm) -> HttpResponse {
    let principal = match principal(user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match reviews::create_review(repo, &principal, form) {
        Ok(review) => HttpResponse::Created().json(review),
        Err(err) => error_response(err, "create review"),
    }
}

/// Public: approved reviews of one product, newest first.
#[get("/reviews/by-product/")]
pub async fn reviews_by_product(
    params: web::Query<ReviewsByProductForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match reviews::reviews_by_product(repo.get_ref(), params.product_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => error_response(err, "list product reviews"),
    }
}

#[post("/reviews/by-user/")]
pub async fn reviews_by_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ReviewsByUserForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match reviews::reviews_by_user(repo.get_ref(), &principal, form.user_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => error_response(err, "list user reviews"),
    }
}

#[patch("/reviews/{review_id}/")]
pub async fn patch_review(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<PatchReviewForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match reviews::patch_review(
        repo.get_ref(),
        &principal,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(err) => error_response(err, "update review"),
    }
}
