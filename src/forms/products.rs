use serde::Deserialize;

use crate::domain::product::ProductStatus;
use crate::forms::{FieldErrors, FormResult};

/// Payload of the "change status" action.
#[derive(Debug, Default, Deserialize)]
pub struct ChangeStatusForm {
    #[serde(default)]
    pub status: Option<String>,
}

impl ChangeStatusForm {
    /// Resolves the submitted value to one of the known statuses.
    pub fn into_status(self) -> FormResult<ProductStatus> {
        let Some(raw) = self.status else {
            return Err(FieldErrors::single("status", "Status is required."));
        };

        raw.trim()
            .parse::<ProductStatus>()
            .map_err(|_| FieldErrors::single("status", "Invalid status."))
    }
}
