pub mod auth;
pub mod feed;
pub mod order;
pub mod product;
pub mod profile;
pub mod review;
pub mod trip;
pub mod visit;
pub mod wishlist;
