//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use inventory_domain::error::{InventoryError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// Maps [`InventoryError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(InventoryError);

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

/// Unparseable or mistyped request bodies are reported as `bad_request`
/// rather than axum's default 415/422.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            InventoryError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            InventoryError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            InventoryError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            InventoryError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorBody {
            code,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
