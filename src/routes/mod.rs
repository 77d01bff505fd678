use std::collections::BTreeMap;

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Serialize;
use serde_json::json;

use crate::domain::auth::Principal;
use crate::services::ServiceError;
use crate::services::pagination::Page;

pub mod feed;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod reviews;
pub mod trips;
pub mod visits;
pub mod wishlist;

/// Registers every handler. Fixed product paths go before `{slug}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(products::list_products)
        .service(products::latest_products)
        .service(products::product_by_id)
        .service(products::related_products)
        .service(products::change_product_status)
        .service(products::delete_product_alias)
        .service(products::product_by_slug)
        .service(products::delete_product)
        .service(reviews::list_reviews)
        .service(reviews::manage_reviews)
        .service(reviews::add_review)
        .service(reviews::add_review_alias)
        .service(reviews::reviews_by_product)
        .service(reviews::reviews_by_user)
        .service(reviews::patch_review)
        .service(visits::list_visits)
        .service(visits::record_visit)
        .service(wishlist::list_wishlist)
        .service(wishlist::add_to_wishlist)
        .service(wishlist::wishlist_entry)
        .service(wishlist::remove_wishlist_entry)
        .service(orders::list_orders)
        .service(orders::add_order)
        .service(orders::show_order)
        .service(orders::edit_order)
        .service(orders::delete_order)
        .service(trips::list_trips)
        .service(trips::trip_history)
        .service(trips::add_trip)
        .service(trips::show_trip)
        .service(trips::edit_trip)
        .service(trips::delete_trip)
        .service(feed::list_notifications)
        .service(feed::add_notification)
        .service(feed::read_notification)
        .service(feed::list_updates)
        .service(feed::add_update)
        .service(feed::read_update)
        .service(feed::show_update)
        .service(feed::edit_update)
        .service(feed::delete_update)
        .service(profiles::show_profile)
        .service(profiles::edit_profile)
        .service(profiles::show_account)
        .service(profiles::edit_account);
}

/// Collection envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct PageEnvelope<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Builds the envelope for `page`, linking neighbours through the request's
/// own path and query string.
pub fn page_envelope<T>(req: &HttpRequest, page: Page<T>) -> PageEnvelope<T> {
    let next = page
        .has_next()
        .then(|| page_link(req, page.page + 1));
    let previous = page
        .has_previous()
        .then(|| page_link(req, page.page - 1));

    PageEnvelope {
        count: page.count,
        next,
        previous,
        results: page.results,
    }
}

fn page_link(req: &HttpRequest, page: usize) -> String {
    let mut params: BTreeMap<String, String> =
        serde_qs::from_str(req.query_string()).unwrap_or_default();

    if page <= 1 {
        params.remove("page");
    } else {
        params.insert("page".to_string(), page.to_string());
    }

    match serde_qs::to_string(&params) {
        Ok(query) if !query.is_empty() => format!("{}?{query}", req.path()),
        _ => req.path().to_string(),
    }
}

/// Resolves the session user into a [`Principal`], or the 401 to answer with.
pub fn principal(user: &AuthenticatedUser) -> Result<Principal, HttpResponse> {
    Principal::try_from(user).map_err(|err| {
        log::warn!("Rejected session with non-numeric subject {:?}", err.0);
        HttpResponse::Unauthorized().json(json!({"detail": "Invalid session subject."}))
    })
}

/// Maps a service failure onto its HTTP response. `context` names the
/// operation in the log line written for internal failures.
pub fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound(message) => HttpResponse::NotFound().json(json!({"error": message})),
        ServiceError::Validation(fields) => HttpResponse::BadRequest().json(json!({
            "error": "validation failed",
            "fields": fields,
        })),
        ServiceError::Invalid(message) => {
            HttpResponse::BadRequest().json(json!({"error": message}))
        }
        ServiceError::Forbidden(message) => {
            HttpResponse::Forbidden().json(json!({"detail": message}))
        }
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::Conflict => HttpResponse::Conflict().json(json!({"error": "conflict"})),
        ServiceError::Internal(details) => {
            log::error!("Failed to {context}: {details}");
            HttpResponse::InternalServerError().json(json!({
                "error": "internal server error",
                "details": details,
            }))
        }
    }
}

/// Turns malformed JSON bodies into the regular 400 error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({"error": message})),
    )
    .into()
}
