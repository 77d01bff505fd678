pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role granting cross-user visibility and moderation rights.
pub const STAFF_ROLE: &str = "staff";
