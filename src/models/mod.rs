pub mod feed;
pub mod order;
pub mod product;
pub mod profile;
pub mod review;
pub mod trip;
pub mod user;
pub mod visit;
pub mod wishlist;
