//! Error responses for the REST API.
//!
//! | Core error | HTTP status |
//! |------------|-------------|
//! | Validation | 400 |
//! | InvalidKind | 500 |
//! | Store | 500 |
//! | BulkLoad | 500 |
//! | Config / seed file | 500 |
//!
//! Request bodies that fail to decode keep axum's status (400, 415 or 422) with the same body.

use api_shared::ErrorRes;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use catalog_core::CatalogError;

/// An error translated into a status code and a `{"message", "error"}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
    error: String,
}

impl ApiError {
    /// Wraps a core error. `message` is the summary shown to callers; the error's own text
    /// becomes the `error` field.
    pub fn from_catalog(message: &'static str, err: CatalogError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("{}: {:?}", message, err);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Self {
            status,
            message,
            error: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: "Invalid request body",
            error: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorRes {
            message: self.message.to_owned(),
            error: self.error,
        };
        (self.status, Json(body)).into_response()
    }
}
