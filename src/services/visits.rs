use std::collections::HashSet;

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::auth::Principal;
use crate::domain::product::Product;
use crate::domain::visit::{ItemType, ProductSnapshot, Visit, VisitTarget, VisitedItem};
use crate::forms::visits::RecordVisitForm;
use crate::repository::{ProductReader, VisitReader, VisitWriter};
use crate::services::products::format_price;
use crate::services::{ServiceError, ServiceResult};

/// Wire representation of a visit with a summary of the visited item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisitView {
    pub id: i32,
    pub item_id: i32,
    pub item_type: ItemType,
    pub timestamp: NaiveDateTime,
    pub product: Option<VisitedItem>,
}

fn snapshot(product: &Product) -> ProductSnapshot {
    ProductSnapshot {
        title: product.title.clone(),
        price: format_price(product.price_cents),
        image: product.image.clone(),
    }
}

/// The caller's visits, newest first, each with its item resolved.
pub fn list_visits<R>(repo: &R, principal: &Principal) -> ServiceResult<Vec<VisitView>>
where
    R: VisitReader + ProductReader + ?Sized,
{
    let visits = repo
        .list_visits(principal.user_id)
        .map_err(ServiceError::from)?;

    let product_ids: Vec<i32> = visits
        .iter()
        .map(|visit| match visit.target() {
            VisitTarget::Product(product_id) => product_id,
        })
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let products = repo
        .get_products_by_ids(&product_ids)
        .map_err(ServiceError::from)?;

    Ok(visits
        .into_iter()
        .map(|visit| {
            let item = match visit.target() {
                VisitTarget::Product(product_id) => products
                    .get(&product_id)
                    .map(|product| VisitedItem::Product(snapshot(product))),
            };
            view(visit, item)
        })
        .collect())
}

fn view(visit: Visit, product: Option<VisitedItem>) -> VisitView {
    VisitView {
        id: visit.id,
        item_id: visit.item_id,
        item_type: visit.item_type,
        timestamp: visit.timestamp,
        product,
    }
}

/// Records (or refreshes) the caller's visit to an item.
pub fn record_visit<R>(repo: &R, principal: &Principal, form: RecordVisitForm) -> ServiceResult<Visit>
where
    R: VisitWriter + ?Sized,
{
    let new_visit = form.into_new_visit(principal.user_id, Utc::now())?;

    repo.record_visit(&new_visit).map_err(ServiceError::from)
}
