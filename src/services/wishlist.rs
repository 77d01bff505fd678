use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::auth::Principal;
use crate::domain::wishlist::{WishlistEntry, WishlistInsert};
use crate::forms::wishlist::AddWishlistForm;
use crate::repository::{ProductReader, WishlistReader, WishlistWriter};
use crate::services::access::{Action, authorize};
use crate::services::products::ProductView;
use crate::services::{ServiceError, ServiceResult};

/// Wire representation of a wishlist entry with its product embedded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WishlistView {
    pub id: i32,
    pub user: i32,
    pub product: Option<ProductView>,
    pub created_at: NaiveDateTime,
}

impl From<WishlistEntry> for WishlistView {
    fn from(entry: WishlistEntry) -> Self {
        Self {
            id: entry.id,
            user: entry.user_id,
            product: entry.product.map(ProductView::from),
            created_at: entry.created_at,
        }
    }
}

/// Outcome of adding a product to the wishlist.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistAdded {
    /// `false` when the pair was already stored.
    pub created: bool,
    pub entry: WishlistView,
}

impl WishlistAdded {
    pub fn message(&self) -> &'static str {
        if self.created {
            "Product added to wishlist"
        } else {
            "Product is already in the wishlist"
        }
    }
}

pub fn list_wishlist<R>(repo: &R, principal: &Principal) -> ServiceResult<Vec<WishlistView>>
where
    R: WishlistReader + ?Sized,
{
    repo.list_wishlist(principal.user_id)
        .map(|entries| entries.into_iter().map(WishlistView::from).collect())
        .map_err(ServiceError::from)
}

/// Idempotent add: a repeated pair reports the stored entry instead of failing.
pub fn add_to_wishlist<R>(
    repo: &R,
    principal: &Principal,
    form: AddWishlistForm,
) -> ServiceResult<WishlistAdded>
where
    R: WishlistWriter + ProductReader + ?Sized,
{
    let Some(product_id) = form.product_id else {
        return Err(ServiceError::Invalid("Product ID is required".to_string()));
    };

    if repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound("Product not found".to_string()));
    }

    let outcome = repo
        .add_to_wishlist(principal.user_id, product_id)
        .map_err(ServiceError::from)?;

    let created = outcome.is_created();
    let entry = match outcome {
        WishlistInsert::Created(entry) | WishlistInsert::Existing(entry) => entry,
    };

    Ok(WishlistAdded {
        created,
        entry: WishlistView::from(entry),
    })
}

fn owned_entry<R>(
    repo: &R,
    principal: &Principal,
    action: Action,
    entry_id: i32,
) -> ServiceResult<WishlistEntry>
where
    R: WishlistReader + ?Sized,
{
    let entry = repo
        .get_wishlist_entry(entry_id)
        .map_err(ServiceError::from)?
        .ok_or_else(ServiceError::not_found)?;

    authorize(principal, action, &entry).into_result(ServiceError::not_found)?;
    Ok(entry)
}

pub fn get_wishlist_entry<R>(
    repo: &R,
    principal: &Principal,
    entry_id: i32,
) -> ServiceResult<WishlistView>
where
    R: WishlistReader + ?Sized,
{
    owned_entry(repo, principal, Action::View, entry_id).map(WishlistView::from)
}

pub fn remove_wishlist_entry<R>(repo: &R, principal: &Principal, entry_id: i32) -> ServiceResult<()>
where
    R: WishlistReader + WishlistWriter + ?Sized,
{
    let entry = owned_entry(repo, principal, Action::Edit, entry_id)?;

    repo.delete_wishlist_entry(entry.id, principal.user_id)
        .map_err(ServiceError::from)
}
