use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{
    NewReview as DomainNewReview, Review as DomainReview, ReviewAuthor, ReviewProduct,
    UpdateReview as DomainUpdateReview,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub product_id: Option<i32>,
    pub rating: i32,
    pub comment: String,
    pub approved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub user_id: i32,
    pub product_id: Option<i32>,
    pub rating: i32,
    pub comment: &'a str,
    pub approved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::reviews)]
pub struct UpdateReview<'a> {
    pub product_id: Option<i32>,
    pub rating: Option<i32>,
    pub comment: Option<&'a str>,
    pub approved: Option<bool>,
}

impl Review {
    pub fn into_domain(self, product: Option<ReviewProduct>, author: ReviewAuthor) -> DomainReview {
        DomainReview {
            id: self.id,
            user_id: self.user_id,
            product_id: self.product_id,
            rating: self.rating,
            comment: self.comment,
            approved: self.approved,
            created_at: self.created_at,
            product,
            author,
        }
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(value: &'a DomainNewReview) -> Self {
        Self {
            user_id: value.user_id,
            product_id: Some(value.product_id),
            rating: value.rating,
            comment: value.comment.as_str(),
            approved: false,
            created_at: chrono::Local::now().naive_utc(),
        }
    }
}

impl<'a> From<&'a DomainUpdateReview> for UpdateReview<'a> {
    fn from(value: &'a DomainUpdateReview) -> Self {
        Self {
            product_id: value.product_id,
            rating: value.rating,
            comment: value.comment.as_deref(),
            approved: value.approved,
        }
    }
}
