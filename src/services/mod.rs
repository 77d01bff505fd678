use thiserror::Error;

use crate::forms::FieldErrors;
use crate::repository::RepositoryError;

pub mod access;
pub mod feed;
pub mod orders;
pub mod pagination;
pub mod products;
pub mod profiles;
pub mod reviews;
pub mod trips;
pub mod visits;
pub mod wishlist;

/// Result alias returned by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures a service call can end with; routes turn them into responses.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing record, or a record the principal may not see.
    #[error("{0}")]
    NotFound(String),
    /// Per-field validation problems in a mutation payload.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// A single-message bad request.
    #[error("{0}")]
    Invalid(String),
    /// The principal is known but lacks the rights for the action.
    #[error("{0}")]
    Forbidden(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("conflict")]
    Conflict,
    /// Unexpected store or runtime failure, with diagnostic detail.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found() -> Self {
        ServiceError::NotFound("Not found.".to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => ServiceError::not_found(),
            RepositoryError::Conflict => ServiceError::Conflict,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        ServiceError::Validation(errors)
    }
}
