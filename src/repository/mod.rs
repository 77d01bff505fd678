use std::collections::HashMap;

use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::pagination::Pagination;

use crate::domain::{
    feed::{FeedEntry, FeedKind, NewFeedEntry, UpdateFeedEntry},
    order::{NewOrder, Order, UpdateOrder},
    product::{Product, ProductListQuery, ProductStatus},
    profile::{Account, Profile, UpdateAccount, UpdateProfile},
    review::{NewReview, Review, ReviewListQuery, UpdateReview},
    trip::{NewTrip, Trip, TripListQuery, UpdateTrip},
    visit::{NewVisit, Visit},
    wishlist::{WishlistEntry, WishlistInsert},
};

pub mod errors;
pub mod feed;
pub mod order;
pub mod product;
pub mod profile;
pub mod review;
pub mod trip;
pub mod visit;
pub mod wishlist;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the product catalog.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn get_product_by_slug(&self, slug: &str) -> RepositoryResult<Option<Product>>;
    /// Products keyed by id; ids with no product are absent from the map.
    fn get_products_by_ids(&self, ids: &[i32]) -> RepositoryResult<HashMap<i32, Product>>;
    /// Returns the total number of matches (after the cap) and the requested page.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Non-deleted products sharing a category with `product_id`, newest first.
    fn list_related_products(&self, product_id: i32, limit: usize)
    -> RepositoryResult<Vec<Product>>;
}

/// Write operations over the product catalog.
pub trait ProductWriter {
    fn update_product_status(
        &self,
        product_id: i32,
        status: ProductStatus,
    ) -> RepositoryResult<Product>;
}

pub trait ReviewReader {
    fn get_review_by_id(&self, id: i32) -> RepositoryResult<Option<Review>>;
    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<Vec<Review>>;
}

pub trait ReviewWriter {
    fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
    fn update_review(&self, review_id: i32, updates: &UpdateReview) -> RepositoryResult<Review>;
}

pub trait WishlistReader {
    fn get_wishlist_entry(&self, id: i32) -> RepositoryResult<Option<WishlistEntry>>;
    fn list_wishlist(&self, user_id: i32) -> RepositoryResult<Vec<WishlistEntry>>;
}

pub trait WishlistWriter {
    /// Atomic get-or-create keyed by the unique (user, product) pair.
    fn add_to_wishlist(&self, user_id: i32, product_id: i32) -> RepositoryResult<WishlistInsert>;
    fn delete_wishlist_entry(&self, entry_id: i32, user_id: i32) -> RepositoryResult<()>;
}

pub trait VisitReader {
    fn list_visits(&self, user_id: i32) -> RepositoryResult<Vec<Visit>>;
}

pub trait VisitWriter {
    /// Inserts the visit or refreshes the timestamp of the existing one.
    fn record_visit(&self, new_visit: &NewVisit) -> RepositoryResult<Visit>;
}

pub trait FeedReader {
    fn get_feed_entry(&self, kind: FeedKind, id: i32) -> RepositoryResult<Option<FeedEntry>>;
    fn list_feed(
        &self,
        kind: FeedKind,
        user_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<FeedEntry>)>;
}

pub trait FeedWriter {
    fn create_feed_entry(
        &self,
        kind: FeedKind,
        new_entry: &NewFeedEntry,
    ) -> RepositoryResult<FeedEntry>;
    fn update_feed_entry(
        &self,
        kind: FeedKind,
        entry_id: i32,
        user_id: i32,
        updates: &UpdateFeedEntry,
    ) -> RepositoryResult<FeedEntry>;
    fn delete_feed_entry(&self, kind: FeedKind, entry_id: i32, user_id: i32)
    -> RepositoryResult<()>;
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, user_id: i32) -> RepositoryResult<Vec<Order>>;
}

pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order(
        &self,
        order_id: i32,
        user_id: i32,
        updates: &UpdateOrder,
    ) -> RepositoryResult<Order>;
    fn delete_order(&self, order_id: i32, user_id: i32) -> RepositoryResult<()>;
}

pub trait TripReader {
    fn get_trip_by_id(&self, id: i32) -> RepositoryResult<Option<Trip>>;
    fn list_trips(&self, query: TripListQuery) -> RepositoryResult<Vec<Trip>>;
}

pub trait TripWriter {
    fn create_trip(&self, new_trip: &NewTrip) -> RepositoryResult<Trip>;
    fn update_trip(&self, trip_id: i32, user_id: i32, updates: &UpdateTrip)
    -> RepositoryResult<Trip>;
    fn delete_trip(&self, trip_id: i32, user_id: i32) -> RepositoryResult<()>;
}

pub trait ProfileReader {
    fn get_profile(&self, user_id: i32) -> RepositoryResult<Option<Profile>>;
    fn get_account(&self, user_id: i32) -> RepositoryResult<Option<Account>>;
}

pub trait ProfileWriter {
    /// Applies the patch, creating an empty profile first when none exists.
    fn update_profile(&self, user_id: i32, updates: &UpdateProfile) -> RepositoryResult<Profile>;
    fn update_account(&self, user_id: i32, updates: &UpdateAccount) -> RepositoryResult<Account>;
}
