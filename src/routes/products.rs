use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, patch, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::forms::products::ChangeStatusForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, page_envelope, principal};
use crate::services::products::{self, ProductParams};

#[get("/products/")]
/// Filtered, ordered and paginated catalog listing.
pub async fn list_products(
    req: HttpRequest,
    params: web::Query<ProductParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), &params) {
        Ok(page) => HttpResponse::Ok().json(page_envelope(&req, page)),
        Err(err) => error_response(err, "list products"),
    }
}

#[get("/products/latest/")]
/// The `count` most recent products, paginated like the main listing.
pub async fn latest_products(
    req: HttpRequest,
    params: web::Query<ProductParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::latest_products(repo.get_ref(), &params) {
        Ok(page) => HttpResponse::Ok().json(page_envelope(&req, page)),
        Err(err) => error_response(err, "list latest products"),
    }
}

#[get("/products/id/{id}/")]
pub async fn product_by_id(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product_by_id(repo.get_ref(), path.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "load product by id"),
    }
}

#[get("/products/related-products/{slug}/")]
pub async fn related_products(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::related_products(repo.get_ref(), &path) {
        Ok(related) => HttpResponse::Ok().json(related),
        Err(err) => error_response(err, "list related products"),
    }
}

#[get("/products/{slug}/")]
pub async fn product_by_slug(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product_by_slug(repo.get_ref(), &path) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "load product"),
    }
}

#[patch("/products/{slug}/change-status/")]
pub async fn change_product_status(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ChangeStatusForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match products::change_product_status(repo.get_ref(), &principal, &path, form.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(json!({
            "status": format!("product {}", product.status.as_str().to_lowercase()),
        })),
        Err(err) => error_response(err, "change product status"),
    }
}

#[delete("/products/{slug}/")]
pub async fn delete_product(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    soft_delete(&path, &user, &repo)
}

#[delete("/products/{slug}/delete/")]
pub async fn delete_product_alias(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    soft_delete(&path, &user, &repo)
}

fn soft_delete(slug: &str, user: &AuthenticatedUser, repo: &DieselRepository) -> HttpResponse {
    let principal = match principal(user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match products::delete_product(repo, &principal, slug) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete product"),
    }
}
