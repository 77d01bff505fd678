use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, patch, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::feed::FeedKind;
use crate::forms::feed::{AddFeedEntryForm, EditFeedEntryForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, page_envelope, principal};
use crate::services::feed;
use crate::services::pagination::PageParams;

fn list(
    req: &HttpRequest,
    user: &AuthenticatedUser,
    repo: &DieselRepository,
    kind: FeedKind,
    params: &PageParams,
) -> HttpResponse {
    let principal = match principal(user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match feed::list_feed(repo, &principal, kind, params) {
        Ok(page) => HttpResponse::Ok().json(page_envelope(req, page)),
        Err(err) => error_response(err, "list feed"),
    }
}

fn create(
    user: &AuthenticatedUser,
    repo: &DieselRepository,
    kind: FeedKind,
    form: AddFeedEntryForm,
) -> HttpResponse {
    let principal = match principal(user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match feed::create_feed_entry(repo, &principal, kind, form) {
        Ok(entry) => HttpResponse::Created().json(entry),
        Err(err) => error_response(err, "create feed entry"),
    }
}

fn mark_read(
    user: &AuthenticatedUser,
    repo: &DieselRepository,
    kind: FeedKind,
    entry_id: i32,
) -> HttpResponse {
    let principal = match principal(user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match feed::mark_feed_entry_read(repo, &principal, kind, entry_id) {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(err) => error_response(err, "mark feed entry read"),
    }
}

#[get("/notifications/")]
pub async fn list_notifications(
    req: HttpRequest,
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    list(&req, &user, &repo, FeedKind::Notification, &params)
}

#[post("/notifications/")]
pub async fn add_notification(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddFeedEntryForm>,
) -> impl Responder {
    create(&user, &repo, FeedKind::Notification, form.into_inner())
}

#[put("/notifications/{entry_id}/")]
pub async fn read_notification(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    mark_read(&user, &repo, FeedKind::Notification, path.into_inner())
}

#[get("/updates/")]
pub async fn list_updates(
    req: HttpRequest,
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    list(&req, &user, &repo, FeedKind::Update, &params)
}

#[post("/updates/")]
pub async fn add_update(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddFeedEntryForm>,
) -> impl Responder {
    create(&user, &repo, FeedKind::Update, form.into_inner())
}

#[put("/updates/{entry_id}/")]
pub async fn read_update(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    mark_read(&user, &repo, FeedKind::Update, path.into_inner())
}

#[get("/updates/{entry_id}/detail/")]
pub async fn show_update(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match feed::get_feed_entry(repo.get_ref(), &principal, FeedKind::Update, path.into_inner()) {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(err) => error_response(err, "load update"),
    }
}

#[patch("/updates/{entry_id}/detail/")]
pub async fn edit_update(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditFeedEntryForm>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match feed::edit_feed_entry(
        repo.get_ref(),
        &principal,
        FeedKind::Update,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(err) => error_response(err, "update feed entry"),
    }
}

#[delete("/updates/{entry_id}/detail/")]
pub async fn delete_update(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let principal = match principal(&user) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match feed::delete_feed_entry(repo.get_ref(), &principal, FeedKind::Update, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete update"),
    }
}
