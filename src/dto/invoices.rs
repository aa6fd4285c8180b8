use serde::Serialize;
use utoipa::ToSchema;

use crate::{forms::FieldErrors, models::Invoice};

pub const MSG_MISSING_FIELDS: &str = "Missing Fields. Failed to Create Invoice.";
pub const MSG_CREATE_DB_ERROR: &str = "Database Error: Failed to Create Invoice.";

/// What the form gets back when create cannot complete: field errors on
/// validation failure, a bare message on database failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InvoiceFormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InvoiceFormState {
    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            errors: Some(errors),
            message: Some(MSG_MISSING_FIELDS.to_string()),
        }
    }

    pub fn database_failure() -> Self {
        Self {
            errors: None,
            message: Some(MSG_CREATE_DB_ERROR.to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceList {
    pub items: Vec<Invoice>,
}
