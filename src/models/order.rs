use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, UpdateOrder as DomainUpdateOrder,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub product_id: Option<i32>,
    pub quantity: i32,
    pub total_cents: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub product_id: Option<i32>,
    pub quantity: i32,
    pub total_cents: i64,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct UpdateOrder<'a> {
    pub quantity: Option<i32>,
    pub total_cents: Option<i64>,
    pub status: Option<&'a str>,
}

impl From<Order> for DomainOrder {
    fn from(value: Order) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            product_id: value.product_id,
            quantity: value.quantity,
            total_cents: value.total_cents,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            user_id: value.user_id,
            product_id: value.product_id,
            quantity: value.quantity,
            total_cents: value.total_cents,
            status: value.status.as_str(),
            created_at: chrono::Local::now().naive_utc(),
        }
    }
}

impl<'a> From<&'a DomainUpdateOrder> for UpdateOrder<'a> {
    fn from(value: &'a DomainUpdateOrder) -> Self {
        Self {
            quantity: value.quantity,
            total_cents: value.total_cents,
            status: value.status.as_deref(),
        }
    }
}
