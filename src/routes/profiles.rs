use actix_web::{HttpResponse, Responder, get, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::profiles::{EditAccountForm, EditProfileForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, principal};
use crate::services::profiles;

#[get("/profile/")]
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match profiles::get_profile(repo.get_ref(), &principal) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(err, "load profile"),
    }
}

/// Partial update; an empty `image` clears the stored path.
#[put("/profile/")]
pub async fn edit_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProfileForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match profiles::update_profile(repo.get_ref(), &principal, form.into_inner()) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(err, "update profile"),
    }
}

#[get("/account/")]
pub async fn show_account(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match profiles::get_account(repo.get_ref(), &principal) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(err) => error_response(err, "load account"),
    }
}

#[put("/account/")]
pub async fn edit_account(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditAccountForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match profiles::update_account(repo.get_ref(), &principal, form.into_inner()) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(err) => error_response(err, "update account"),
    }
}
