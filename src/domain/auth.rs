use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::STAFF_ROLE;

/// The authenticated actor on whose behalf a request is handled.
///
/// Built explicitly from the session claims and passed into every service
/// call that acts for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// Identifier of the `users` row the session belongs to.
    pub user_id: i32,
    /// Whether the principal holds the staff role.
    pub is_staff: bool,
}

impl Principal {
    pub fn new(user_id: i32, is_staff: bool) -> Self {
        Self { user_id, is_staff }
    }
}

/// Returned when session claims do not name a numeric user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSubject(pub String);

impl TryFrom<&AuthenticatedUser> for Principal {
    type Error = InvalidSubject;

    fn try_from(value: &AuthenticatedUser) -> Result<Self, Self::Error> {
        let user_id = value
            .sub
            .trim()
            .parse::<i32>()
            .map_err(|_| InvalidSubject(value.sub.clone()))?;

        Ok(Self {
            user_id,
            is_staff: check_role(STAFF_ROLE, &value.roles),
        })
    }
}
