use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{product::Product as DomainProduct, wishlist::WishlistEntry as DomainEntry};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::wishlists)]
pub struct WishlistEntry {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::wishlists)]
pub struct NewWishlistEntry {
    pub user_id: i32,
    pub product_id: i32,
    pub created_at: NaiveDateTime,
}

impl WishlistEntry {
    pub fn into_domain(self, product: Option<DomainProduct>) -> DomainEntry {
        DomainEntry {
            id: self.id,
            user_id: self.user_id,
            product_id: self.product_id,
            created_at: self.created_at,
            product,
        }
    }
}

impl NewWishlistEntry {
    pub fn new(user_id: i32, product_id: i32) -> Self {
        Self {
            user_id,
            product_id,
            created_at: chrono::Local::now().naive_utc(),
        }
    }
}
