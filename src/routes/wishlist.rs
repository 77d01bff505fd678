use actix_web::{HttpResponse, Responder, delete, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::forms::wishlist::AddWishlistForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, principal};
use crate::services::wishlist;

#[get("/wishlist/")]
pub async fn list_wishlist(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match wishlist::list_wishlist(repo.get_ref(), &principal) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(err) => error_response(err, "list wishlist"),
    }
}

/// 201 for a new pair, 200 when the product was already wished for.
#[post("/wishlist/")]
pub async fn add_to_wishlist(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddWishlistForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match wishlist::add_to_wishlist(repo.get_ref(), &principal, form.into_inner()) {
        Ok(added) => {
            let body = json!({"message": added.message()});
            if added.created {
                HttpResponse::Created().json(body)
            } else {
                HttpResponse::Ok().json(body)
            }
        }
        Err(err) => error_response(err, "add to wishlist"),
    }
}

#[get("/wishlist/{entry_id}/")]
pub async fn wishlist_entry(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match wishlist::get_wishlist_entry(repo.get_ref(), &principal, path.into_inner()) {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(err) => error_response(err, "load wishlist entry"),
    }
}

#[delete("/wishlist/{entry_id}/")]
pub async fn remove_wishlist_entry(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match wishlist::remove_wishlist_entry(repo.get_ref(), &principal, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "remove wishlist entry"),
    }
}
