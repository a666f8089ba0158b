use std::fmt::Display;

use anyhow;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Error for handlers that render pages.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type Result<T = (), E = AppError> = anyhow::Result<T, E>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "request failed");

        return (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR).into_response();
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Error for handlers answering the in-page script. The client only ever
/// sees a generic message.
#[derive(Debug)]
pub struct JsonError(pub anyhow::Error);

pub type JsonResult<T> = Result<T, JsonError>;

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "request failed");

        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": INTERNAL_SERVER_ERROR })),
        )
            .into_response();
    }
}

impl<E> From<E> for JsonError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
