use serde::Deserialize;
use validator::Validate;

use crate::forms::{FieldErrors, FormResult, IdField, optional_text};

const STATUS_MAX_LEN: u64 = 32;

/// Validated request to place an order; totals are priced by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRequest {
    pub product_id: i32,
    pub quantity: i32,
}

/// Payload of a new order for the caller.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddOrderForm {
    #[serde(default)]
    pub product_id: IdField,
    /// Defaults to a single unit.
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl AddOrderForm {
    pub fn into_request(self) -> FormResult<OrderRequest> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let product_id = self.product_id.check(&mut errors, "product_id", true);

        match product_id {
            Some(product_id) if errors.is_empty() => Ok(OrderRequest {
                product_id,
                quantity: self.quantity.unwrap_or(1),
            }),
            _ => Err(errors),
        }
    }
}

/// Validated order patch; the service reprices when the quantity changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderChanges {
    pub quantity: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditOrderForm {
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    #[serde(default)]
    pub quantity: Option<i32>,
    #[validate(length(max = STATUS_MAX_LEN, message = "Status is too long."))]
    #[serde(default)]
    pub status: Option<String>,
}

impl EditOrderForm {
    pub fn into_changes(self) -> FormResult<OrderChanges> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(err),
        };

        let status = optional_text(&mut errors, "status", self.status.as_deref(), false);

        errors.into_result(OrderChanges {
            quantity: self.quantity,
            status,
        })
    }
}
