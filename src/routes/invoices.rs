use axum::{
    Json, Router,
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::invoices::InvoiceList,
    error::AppResult,
    forms::InvoiceForm,
    response::ApiResponse,
    services::invoice_service::{self, MutationOutcome},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route(
            "/{id}",
            axum::routing::put(update_invoice).delete(delete_invoice),
        )
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "Invoice listing", body = ApiResponse<InvoiceList>),
    ),
    tag = "Invoices"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<InvoiceList>>> {
    let response = invoice_service::list_invoices(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the listing"),
        (status = 422, description = "Validation failed; form state with field errors"),
        (status = 500, description = "Database failure; form state with message"),
    ),
    tag = "Invoices"
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<InvoiceForm>,
) -> Response {
    match invoice_service::create_invoice(&state, form).await {
        MutationOutcome::Redirect(path) => Redirect::to(&path).into_response(),
        MutationOutcome::Rerender(form_state) => {
            let status = if form_state.errors.is_some() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(form_state)).into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the listing"),
        (status = 404, description = "Invoice not found"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Invoices"
)]
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<InvoiceForm>,
) -> AppResult<Response> {
    match invoice_service::update_invoice(&state, id, form).await? {
        MutationOutcome::Redirect(path) => Ok(Redirect::to(&path).into_response()),
        MutationOutcome::Rerender(form_state) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(form_state)).into_response())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Invoice not found"),
    ),
    tag = "Invoices"
)]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    invoice_service::delete_invoice(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
