//! HTTP error mapping
//!
//! Library errors surface to clients as `{ "message": … }` JSON with a
//! status that matches the error taxonomy. Internal failures never leak
//! details beyond the message line.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use careerchat_core::Error;

pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::InvalidPeriod(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            Error::Upstream(_) => {
                tracing::error!(error = %self.0, "Upstream failure");
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }
            other => {
                tracing::error!(error = %other, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "message": message });
        (status, Json(body)).into_response()
    }
}
