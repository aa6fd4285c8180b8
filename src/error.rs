use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    forms::FieldErrors,
    response::{ApiResponse, Meta},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Invalid form submission")]
    Validation(FieldErrors),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Hard validation failures carry the field errors in the body so
            // the form can render them.
            AppError::Validation(errors) => {
                let body = ApiResponse {
                    message: "Invalid form submission".to_string(),
                    data: Some(errors),
                    meta: Some(Meta::empty()),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
            }
            other => {
                let status = match &other {
                    AppError::NotFound => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let body = ApiResponse {
                    message: other.to_string(),
                    data: Some(ErrorData {
                        error: other.to_string(),
                    }),
                    meta: Some(Meta::empty()),
                };
                (status, axum::Json(body)).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
