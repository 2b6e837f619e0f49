//! Response helpers for API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Response helper for created resources
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Response helper for a successful request with an empty body
pub struct EmptyOk;

impl IntoResponse for EmptyOk {
    fn into_response(self) -> Response {
        StatusCode::OK.into_response()
    }
}
