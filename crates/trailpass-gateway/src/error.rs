//! API error taxonomy and its mapping onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use trailpass_core::TrailPassError;

/// Errors surfaced by the API. Every variant renders as a short JSON
/// `{"error": ...}` body; nothing internal leaks to clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client input failed a validation rule; the first failing rule's
    /// message is surfaced verbatim.
    #[error("{0}")]
    Validation(String),

    /// Wrong HTTP method on a known endpoint.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Unknown route.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure while processing. The detail is logged; clients
    /// only see a generic message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        Self::Internal(detail.to_string())
    }
}

impl From<TrailPassError> for ApiError {
    fn from(err: TrailPassError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(detail) => {
                tracing::error!("💥 Internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_detail_does_not_leak() {
        let response = ApiError::internal("store lock poisoned at shard 3").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The body is rendered from the generic message, not the detail.
        let err = ApiError::Internal("secret detail".into());
        match err {
            ApiError::Internal(detail) => assert_eq!(detail, "secret detail"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("nope".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
