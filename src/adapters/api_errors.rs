use crate::domain::error::PaymentError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype so the domain error can become an axum response. Only the
/// category reaches the client; details stay in the server log.
pub enum ApiError {
    Payment(PaymentError),
    InvalidBody(JsonRejection),
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self::Payment(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection, "malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    serde_json::json!({
                        "error_code": "invalid_body",
                        "message": "invalid request body format",
                    }),
                )
            }
            Self::Payment(PaymentError::Validation(err)) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error_code": "validation_error",
                    "field": err.field,
                    "message": err.message,
                }),
            ),
            Self::Payment(PaymentError::NotFound) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({
                    "error_code": "not_found",
                    "message": "payment not found",
                }),
            ),
            Self::Payment(err @ (PaymentError::Authorization(_) | PaymentError::Storage(_))) => {
                tracing::error!(error = %err, retryable = err.is_retryable(), "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "error_code": "internal_error",
                        "message": "internal error",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
