//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Any fault while generating; always a 500.
    Generation(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Generation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error generating UI layout: {}", msg),
            ),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}
