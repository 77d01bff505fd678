use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{Product as DomainProduct, ProductStatus};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub status: String,
    pub image: Option<String>,
    pub location_id: Option<i32>,
    pub date: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProductStatus<'a> {
    pub status: &'a str,
}

impl Product {
    pub fn into_domain(self, categories: Vec<i32>) -> DomainProduct {
        let status = self.status.parse().unwrap_or_else(|err| {
            log::warn!("Product {} has {err}; treating it as a draft", self.id);
            ProductStatus::Draft
        });

        DomainProduct {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            price_cents: self.price_cents,
            status,
            image: self.image,
            location_id: self.location_id,
            categories,
            date: self.date,
        }
    }
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        value.into_domain(Vec::new())
    }
}

impl<'a> From<&'a ProductStatus> for UpdateProductStatus<'a> {
    fn from(value: &'a ProductStatus) -> Self {
        Self {
            status: value.as_str(),
        }
    }
}
