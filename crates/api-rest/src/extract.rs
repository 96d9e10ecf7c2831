//! Request extractors.

use axum::extract::FromRequest;

use crate::ApiError;

/// `axum::Json` with its rejection reported as an [`ApiError`], so a malformed or mistyped
/// body gets the same `{"message", "error"}` shape as every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
