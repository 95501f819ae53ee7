//! Error responses shared by the handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use debtmap_common::DebtMapError;
use tracing::error;

/// Handler error, rendered as `{ "error": <message> }`.
#[derive(Debug)]
pub struct ApiError(pub DebtMapError);

impl From<DebtMapError> for ApiError {
    fn from(err: DebtMapError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        error_response(status, self.0.to_string())
    }
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}
