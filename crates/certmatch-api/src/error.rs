//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use certmatch_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Handler error: an [`AppError`] that knows how to render itself.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status and error code for an error kind.
    pub fn status_and_code(kind: ErrorKind) -> (StatusCode, &'static str) {
        match kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Database => (StatusCode::INTERNAL_SERVER_ERROR, "QUERY_FAILED"),
            ErrorKind::Configuration | ErrorKind::Serialization | ErrorKind::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = Self::status_and_code(err.kind);

        if status.is_server_error() {
            let cause = std::error::Error::source(&err).map(ToString::to_string);
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                cause = cause.as_deref().unwrap_or("-"),
                "Request failed"
            );
        }

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ErrorKind::Validation, 400, "VALIDATION_ERROR"),
            (ErrorKind::Authentication, 401, "UNAUTHORIZED"),
            (ErrorKind::Authorization, 403, "FORBIDDEN"),
            (ErrorKind::NotFound, 404, "NOT_FOUND"),
            (ErrorKind::Conflict, 409, "CONFLICT"),
            (ErrorKind::Database, 500, "QUERY_FAILED"),
            (ErrorKind::Internal, 500, "INTERNAL_ERROR"),
            (ErrorKind::ServiceUnavailable, 503, "SERVICE_UNAVAILABLE"),
        ];
        for (kind, status, code) in cases {
            let (s, c) = ApiError::status_and_code(kind);
            assert_eq!(s.as_u16(), status, "{kind}");
            assert_eq!(c, code);
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::from(AppError::database("Company query failed")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
