use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::auth::Principal;
use crate::domain::order::{NewOrder, Order, UpdateOrder};
use crate::forms::FieldErrors;
use crate::forms::orders::{AddOrderForm, EditOrderForm};
use crate::repository::{OrderReader, OrderWriter, ProductReader};
use crate::services::access::{Action, authorize};
use crate::services::products::format_price;
use crate::services::{ServiceError, ServiceResult};

/// Wire representation of an order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderView {
    pub id: i32,
    pub user: i32,
    pub product: Option<i32>,
    pub quantity: i32,
    pub total: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user: order.user_id,
            product: order.product_id,
            quantity: order.quantity,
            total: format_price(order.total_cents),
            status: order.status,
            created_at: order.created_at,
        }
    }
}

fn total_cents(unit_cents: i64, quantity: i32) -> ServiceResult<i64> {
    unit_cents
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| FieldErrors::single("quantity", "Order total is too large.").into())
}

pub fn list_orders<R>(repo: &R, principal: &Principal) -> ServiceResult<Vec<OrderView>>
where
    R: OrderReader + ?Sized,
{
    repo.list_orders(principal.user_id)
        .map(|orders| orders.into_iter().map(OrderView::from).collect())
        .map_err(ServiceError::from)
}

/// Places an order for the caller, priced from the current product price.
pub fn create_order<R>(repo: &R, principal: &Principal, form: AddOrderForm) -> ServiceResult<OrderView>
where
    R: OrderWriter + ProductReader + ?Sized,
{
    let request = form.into_request()?;

    let Some(product) = repo
        .get_product_by_id(request.product_id)
        .map_err(ServiceError::from)?
    else {
        return Err(FieldErrors::single(
            "product_id",
            format!("Invalid pk \"{}\" - object does not exist.", request.product_id),
        )
        .into());
    };

    let total = total_cents(product.price_cents, request.quantity)?;
    let new_order = NewOrder::new(principal.user_id, Some(product.id), request.quantity, total);

    repo.create_order(&new_order)
        .map(OrderView::from)
        .map_err(ServiceError::from)
}

fn owned_order<R>(
    repo: &R,
    principal: &Principal,
    action: Action,
    order_id: i32,
) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or_else(ServiceError::not_found)?;

    authorize(principal, action, &order).into_result(ServiceError::not_found)?;
    Ok(order)
}

pub fn get_order<R>(repo: &R, principal: &Principal, order_id: i32) -> ServiceResult<OrderView>
where
    R: OrderReader + ?Sized,
{
    owned_order(repo, principal, Action::View, order_id).map(OrderView::from)
}

/// Changes quantity and/or status. A new quantity reprices the order.
pub fn update_order<R>(
    repo: &R,
    principal: &Principal,
    order_id: i32,
    form: EditOrderForm,
) -> ServiceResult<OrderView>
where
    R: OrderReader + OrderWriter + ProductReader + ?Sized,
{
    let order = owned_order(repo, principal, Action::Edit, order_id)?;
    let changes = form.into_changes()?;

    let total_cents = match changes.quantity {
        Some(quantity) if quantity != order.quantity => {
            let product = match order.product_id {
                Some(product_id) => repo
                    .get_product_by_id(product_id)
                    .map_err(ServiceError::from)?,
                None => None,
            };
            // Without a product the unit price is recovered from the stored total.
            let unit_cents = match product {
                Some(product) => product.price_cents,
                None => order.total_cents / i64::from(order.quantity.max(1)),
            };
            Some(total_cents(unit_cents, quantity)?)
        }
        _ => None,
    };

    let updates = UpdateOrder {
        quantity: changes.quantity,
        total_cents,
        status: changes.status,
    };

    repo.update_order(order.id, principal.user_id, &updates)
        .map(OrderView::from)
        .map_err(ServiceError::from)
}

pub fn delete_order<R>(repo: &R, principal: &Principal, order_id: i32) -> ServiceResult<()>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    let order = owned_order(repo, principal, Action::Edit, order_id)?;

    repo.delete_order(order.id, principal.user_id)
        .map_err(ServiceError::from)
}
