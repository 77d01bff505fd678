use std::collections::HashMap;

use mockall::mock;
use pushkind_common::pagination::Pagination;

use super::{
    FeedReader, FeedWriter, OrderReader, OrderWriter, ProductReader, ProductWriter, ProfileReader,
    ProfileWriter, RepositoryResult, ReviewReader, ReviewWriter, TripReader, TripWriter,
    VisitReader, VisitWriter, WishlistReader, WishlistWriter,
};
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

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_slug(&self, slug: &str) -> RepositoryResult<Option<Product>>;
        fn get_products_by_ids(&self, ids: &[i32]) -> RepositoryResult<HashMap<i32, Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_related_products(&self, product_id: i32, limit: usize) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn update_product_status(&self, product_id: i32, status: ProductStatus) -> RepositoryResult<Product>;
    }
}

mock! {
    pub ReviewReader {}

    impl ReviewReader for ReviewReader {
        fn get_review_by_id(&self, id: i32) -> RepositoryResult<Option<Review>>;
        fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<Vec<Review>>;
    }
}

mock! {
    pub ReviewWriter {}

    impl ReviewWriter for ReviewWriter {
        fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
        fn update_review(&self, review_id: i32, updates: &UpdateReview) -> RepositoryResult<Review>;
    }
}

mock! {
    pub WishlistReader {}

    impl WishlistReader for WishlistReader {
        fn get_wishlist_entry(&self, id: i32) -> RepositoryResult<Option<WishlistEntry>>;
        fn list_wishlist(&self, user_id: i32) -> RepositoryResult<Vec<WishlistEntry>>;
    }
}

mock! {
    pub WishlistWriter {}

    impl WishlistWriter for WishlistWriter {
        fn add_to_wishlist(&self, user_id: i32, product_id: i32) -> RepositoryResult<WishlistInsert>;
        fn delete_wishlist_entry(&self, entry_id: i32, user_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub VisitReader {}

    impl VisitReader for VisitReader {
        fn list_visits(&self, user_id: i32) -> RepositoryResult<Vec<Visit>>;
    }
}

mock! {
    pub VisitWriter {}

    impl VisitWriter for VisitWriter {
        fn record_visit(&self, new_visit: &NewVisit) -> RepositoryResult<Visit>;
    }
}

mock! {
    pub FeedReader {}

    impl FeedReader for FeedReader {
        fn get_feed_entry(&self, kind: FeedKind, id: i32) -> RepositoryResult<Option<FeedEntry>>;
        fn list_feed(&self, kind: FeedKind, user_id: i32, pagination: Option<Pagination>) -> RepositoryResult<(usize, Vec<FeedEntry>)>;
    }
}

mock! {
    pub FeedWriter {}

    impl FeedWriter for FeedWriter {
        fn create_feed_entry(&self, kind: FeedKind, new_entry: &NewFeedEntry) -> RepositoryResult<FeedEntry>;
        fn update_feed_entry(&self, kind: FeedKind, entry_id: i32, user_id: i32, updates: &UpdateFeedEntry) -> RepositoryResult<FeedEntry>;
        fn delete_feed_entry(&self, kind: FeedKind, entry_id: i32, user_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, user_id: i32) -> RepositoryResult<Vec<Order>>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order(&self, order_id: i32, user_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
        fn delete_order(&self, order_id: i32, user_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub TripReader {}

    impl TripReader for TripReader {
        fn get_trip_by_id(&self, id: i32) -> RepositoryResult<Option<Trip>>;
        fn list_trips(&self, query: TripListQuery) -> RepositoryResult<Vec<Trip>>;
    }
}

mock! {
    pub TripWriter {}

    impl TripWriter for TripWriter {
        fn create_trip(&self, new_trip: &NewTrip) -> RepositoryResult<Trip>;
        fn update_trip(&self, trip_id: i32, user_id: i32, updates: &UpdateTrip) -> RepositoryResult<Trip>;
        fn delete_trip(&self, trip_id: i32, user_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProfileReader {}

    impl ProfileReader for ProfileReader {
        fn get_profile(&self, user_id: i32) -> RepositoryResult<Option<Profile>>;
        fn get_account(&self, user_id: i32) -> RepositoryResult<Option<Account>>;
    }
}

mock! {
    pub ProfileWriter {}

    impl ProfileWriter for ProfileWriter {
        fn update_profile(&self, user_id: i32, updates: &UpdateProfile) -> RepositoryResult<Profile>;
        fn update_account(&self, user_id: i32, updates: &UpdateAccount) -> RepositoryResult<Account>;
    }
}
