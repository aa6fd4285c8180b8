//! Invoice mutations: validate the submitted form, issue one parameterized
//! statement, revalidate the listing cache, and hand the navigation effect
//! back to the route as a value instead of firing it as a side channel.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::invoices::{InvoiceFormState, InvoiceList},
    error::{AppError, AppResult},
    forms::{InvoiceForm, parse_invoice_form},
    models::Invoice,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Listing path that mutations revalidate and redirect to.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Navigation effect of a mutation, returned to the caller explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Redirect(String),
    Rerender(InvoiceFormState),
}

/// Create an invoice. Validation and database failures are both recovered
/// locally into a rerender state; only a successful insert redirects.
pub async fn create_invoice(state: &AppState, form: InvoiceForm) -> MutationOutcome {
    let draft = match parse_invoice_form(&form) {
        Ok(draft) => draft,
        Err(errors) => {
            tracing::debug!("invoice form rejected");
            return MutationOutcome::Rerender(InvoiceFormState::invalid(errors));
        }
    };

    let id = Uuid::new_v4();
    let date = Utc::now().date_naive();

    let inserted = sqlx::query(
        r#"
        INSERT INTO invoices (id, customer_id, amount, status, date)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(&draft.customer_id)
    .bind(draft.amount_in_cents)
    .bind(draft.status.as_str())
    .bind(date)
    .execute(&state.pool)
    .await;

    if let Err(err) = inserted {
        tracing::error!(error = %err, "invoice insert failed");
        return MutationOutcome::Rerender(InvoiceFormState::database_failure());
    }

    state.cache.revalidate(INVOICES_PATH).await;
    MutationOutcome::Redirect(INVOICES_PATH.to_string())
}

/// Update an invoice by id. Validation is strict here: any bad field fails
/// the whole call before the database is touched, and database errors
/// propagate instead of being swallowed.
pub async fn update_invoice(
    state: &AppState,
    id: Uuid,
    form: InvoiceForm,
) -> AppResult<MutationOutcome> {
    let draft = parse_invoice_form(&form).map_err(AppError::Validation)?;

    let result = sqlx::query(
        r#"
        UPDATE invoices
        SET customer_id = $1, amount = $2, status = $3
        WHERE id = $4
        "#,
    )
    .bind(&draft.customer_id)
    .bind(draft.amount_in_cents)
    .bind(draft.status.as_str())
    .bind(id)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    state.cache.revalidate(INVOICES_PATH).await;
    Ok(MutationOutcome::Redirect(INVOICES_PATH.to_string()))
}

/// Delete an invoice by id and revalidate the listing. No redirect.
pub async fn delete_invoice(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    state.cache.revalidate(INVOICES_PATH).await;
    Ok(())
}

/// Serve the invoice listing, from the cache when it is warm.
pub async fn list_invoices(state: &AppState) -> AppResult<ApiResponse<InvoiceList>> {
    if let Some(items) = state.cache.get(INVOICES_PATH).await {
        let meta = Meta::listing(items.len() as i64, true);
        return Ok(ApiResponse::success(
            "Invoices",
            InvoiceList { items },
            Some(meta),
        ));
    }

    let items = sqlx::query_as::<_, Invoice>(
        "SELECT * FROM invoices ORDER BY date DESC, id",
    )
    .fetch_all(&state.pool)
    .await?;

    state.cache.put(INVOICES_PATH, items.clone()).await;

    let meta = Meta::listing(items.len() as i64, false);
    Ok(ApiResponse::success(
        "Invoices",
        InvoiceList { items },
        Some(meta),
    ))
}
