//! Explicit validation for the invoice form. The form arrives as untyped
//! strings; parsing either yields a typed draft ready for the database or a
//! full set of field-keyed messages. Failures are collected, not
//! short-circuited, so a submission with several bad fields reports them all.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::InvoiceStatus;

pub const MSG_CUSTOMER: &str = "Please select a customer.";
pub const MSG_AMOUNT: &str = "Please enter an amount greater than $0.";
pub const MSG_STATUS: &str = "Please select an invoice status.";

/// Raw form submission: every field optional and untyped.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct InvoiceForm {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

/// Per-field validation messages, keyed the way the form renders them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customer_id: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amount: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_empty() && self.amount.is_empty() && self.status.is_empty()
    }
}

/// A validated invoice payload. Amount is already converted to cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

pub fn parse_invoice_form(form: &InvoiceForm) -> Result<InvoiceDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    let customer_id = match form.customer_id.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => Some(c.to_string()),
        _ => {
            errors.customer_id.push(MSG_CUSTOMER.to_string());
            None
        }
    };

    let amount_in_cents = match form
        .amount
        .as_deref()
        .map(str::trim)
        .and_then(dollars_to_cents)
    {
        Some(cents) if cents > 0 => Some(cents),
        _ => {
            errors.amount.push(MSG_AMOUNT.to_string());
            None
        }
    };

    let status = match form.status.as_deref().map(str::trim).and_then(InvoiceStatus::parse) {
        Some(s) => Some(s),
        None => {
            errors.status.push(MSG_STATUS.to_string());
            None
        }
    };

    match (customer_id, amount_in_cents, status) {
        (Some(customer_id), Some(amount_in_cents), Some(status)) => Ok(InvoiceDraft {
            customer_id,
            amount_in_cents,
            status,
        }),
        _ => Err(errors),
    }
}

/// Parse a decimal dollar string into exact integer cents. At most two
/// fractional digits are accepted; anything finer has no cent representation.
fn dollars_to_cents(raw: &str) -> Option<i64> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let (whole, frac) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 {
        return None;
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let mut frac_cents: i64 = if frac.is_empty() {
        0
    } else {
        frac.parse().ok()?
    };
    if frac.len() == 1 {
        frac_cents *= 10;
    }

    let cents = whole.checked_mul(100)?.checked_add(frac_cents)?;
    Some(if negative { -cents } else { cents })
}
