use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::orders::{AddOrderForm, EditOrderForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, principal};
use crate::services::orders;

#[get("/orders/")]
pub async fn list_orders(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match orders::list_orders(repo.get_ref(), &principal) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => error_response(err, "list orders"),
    }
}

#[post("/orders/")]
pub async fn add_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddOrderForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match orders::create_order(repo.get_ref(), &principal, form.into_inner()) {
        Ok(order) => HttpResponse::Created().json(order),
        Err(err) => error_response(err, "create order"),
    }
}

#[get("/orders/{order_id}/")]
pub async fn show_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match orders::get_order(repo.get_ref(), &principal, path.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response(err, "load order"),
    }
}

#[patch("/orders/{order_id}/")]
pub async fn edit_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditOrderForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match orders::update_order(
        repo.get_ref(),
        &principal,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response(err, "update order"),
    }
}

#[delete("/orders/{order_id}/")]
pub async fn delete_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match orders::delete_order(repo.get_ref(), &principal, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete order"),
    }
}
