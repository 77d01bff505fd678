//! Ownership and role checks shared by the per-user resources.
//!
//! Records that belong to someone else are reported as hidden, which the
//! services surface as "not found" so that their existence does not leak.

use crate::domain::auth::Principal;
use crate::domain::feed::FeedEntry;
use crate::domain::order::Order;
use crate::domain::review::Review;
use crate::domain::trip::Trip;
use crate::domain::visit::Visit;
use crate::domain::wishlist::WishlistEntry;
use crate::services::ServiceError;

const NOT_AUTHORIZED: &str = "Not authorized.";

/// What a principal is trying to do with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    /// Staff-only changes such as approving a review.
    Moderate,
}

/// Who besides the owner may act on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Owner or any staff principal.
    OwnerOrStaff,
    /// Owner only; other principals cannot even see the record.
    OwnerOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The record is visible but the action is not allowed.
    NotAuthorized,
    /// The record must look absent to this principal.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    /// Converts a denial into the matching service error.
    pub fn into_result(self, not_found: impl FnOnce() -> ServiceError) -> Result<(), ServiceError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::Hidden) => Err(not_found()),
            Decision::Deny(DenyReason::NotAuthorized) => {
                Err(ServiceError::Forbidden(NOT_AUTHORIZED.to_string()))
            }
        }
    }
}

/// A record carrying an owning user.
pub trait Owned {
    fn owner_id(&self) -> i32;

    fn ownership(&self) -> Ownership {
        Ownership::OwnerOnly
    }
}

impl Owned for Review {
    fn owner_id(&self) -> i32 {
        self.user_id
    }

    fn ownership(&self) -> Ownership {
        Ownership::OwnerOrStaff
    }
}

impl Owned for WishlistEntry {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for Order {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for Trip {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for FeedEntry {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for Visit {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

/// Decides whether `principal` may perform `action` on `target`.
pub fn authorize<T>(principal: &Principal, action: Action, target: &T) -> Decision
where
    T: Owned + ?Sized,
{
    let is_owner = target.owner_id() == principal.user_id;

    match target.ownership() {
        Ownership::OwnerOnly if !is_owner => Decision::Deny(DenyReason::Hidden),
        _ if action == Action::Moderate && !principal.is_staff => {
            Decision::Deny(DenyReason::NotAuthorized)
        }
        Ownership::OwnerOnly => Decision::Allow,
        Ownership::OwnerOrStaff if is_owner || principal.is_staff => Decision::Allow,
        Ownership::OwnerOrStaff => Decision::Deny(DenyReason::NotAuthorized),
    }
}

/// Which reviews a principal gets when listing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewScope {
    All,
    OwnedBy(i32),
}

pub fn review_scope(principal: &Principal) -> ReviewScope {
    if principal.is_staff {
        ReviewScope::All
    } else {
        ReviewScope::OwnedBy(principal.user_id)
    }
}
