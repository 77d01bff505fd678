use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::forms::visits::RecordVisitForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, principal};
use crate::services::visits;

#[get("/visits/")]
pub async fn list_visits(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match visits::list_visits(repo.get_ref(), &principal) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => error_response(err, "list visits"),
    }
}

/// The visitor is always the session user; the body only names the item.
#[post("/visits/")]
pub async fn record_visit(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RecordVisitForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match visits::record_visit(repo.get_ref(), &principal, form.into_inner()) {
        Ok(_) => HttpResponse::Created().json(json!({"status": "visit recorded"})),
        Err(err) => error_response(err, "record visit"),
    }
}
