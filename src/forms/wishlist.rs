use serde::Deserialize;

use crate::forms::optional_id;

/// Payload for saving a product to the caller's wishlist.
#[derive(Debug, Default, Deserialize)]
pub struct AddWishlistForm {
    #[serde(default, deserialize_with = "optional_id")]
    pub product_id: Option<i32>,
}
