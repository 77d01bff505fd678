use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::trips::{AddTripForm, EditTripForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, principal};
use crate::services::trips;

#[get("/trips/")]
pub async fn list_trips(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match trips::list_trips(repo.get_ref(), &principal) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => error_response(err, "list trips"),
    }
}

#[get("/history/")]
/// Trips already behind the caller.
pub async fn trip_history(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match trips::past_trips(repo.get_ref(), &principal) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => error_response(err, "list trip history"),
    }
}

#[post("/trips/")]
pub async fn add_trip(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddTripForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match trips::create_trip(repo.get_ref(), &principal, form.into_inner()) {
        Ok(trip) => HttpResponse::Created().json(trip),
        Err(err) => error_response(err, "create trip"),
    }
}

#[get("/trips/{trip_id}/")]
pub async fn show_trip(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match trips::get_trip(repo.get_ref(), &principal, path.into_inner()) {
        Ok(trip) => HttpResponse::Ok().json(trip),
        Err(err) => error_response(err, "load trip"),
    }
}

#[patch("/trips/{trip_id}/")]
pub async fn edit_trip(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditTripForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match trips::update_trip(
        repo.get_ref(),
        &principal,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(trip) => HttpResponse::Ok().json(trip),
        Err(err) => error_response(err, "update trip"),
    }
}

#[delete("/trips/{trip_id}/")]
pub async fn delete_trip(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match trips::delete_trip(repo.get_ref(), &principal, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete trip"),
    }
}
