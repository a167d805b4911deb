//! API error type with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;

/// API-level error wrapper mapping checkout failures to HTTP responses.
///
/// Cart validation is the client's fault (400); a collaborator status
/// failure propagates that status; everything else is a 500. The body
/// is the error's plain-text description.
#[derive(Debug)]
pub struct ApiError(CheckoutError);

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CheckoutError::Cart(_) => StatusCode::BAD_REQUEST,
            _ => self
                .0
                .upstream_status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        let message = self.0.to_string();
        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        } else {
            tracing::warn!(error = %message, %status, "request rejected");
        }
        (status, message).into_response()
    }
}
