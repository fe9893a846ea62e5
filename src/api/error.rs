// ⚠️ API Errors - directory errors → HTTP status + {"message": ...} body

use crate::context::CancelReason;
use crate::error::DirectoryError;
use crate::validation::ValidationErrors;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Field-level validation failures
    #[error("{message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// The request context was canceled
    #[error("{0}")]
    Unavailable(String),

    /// The request deadline passed
    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation {
            message: err.to_string(),
            errors: err.errors,
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        let message = err.to_string();
        match err {
            DirectoryError::MalformedIdentifier(_) => ApiError::BadRequest(message),
            DirectoryError::Cancelled(CancelReason::DeadlineExceeded) => ApiError::Timeout(message),
            DirectoryError::Cancelled(CancelReason::Canceled) => ApiError::Unavailable(message),
            DirectoryError::AlreadyExists(_) => ApiError::Conflict(message),
            DirectoryError::NotFound(_) => ApiError::NotFound(message),
            DirectoryError::Store(_) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        }

        let body = match &self {
            ApiError::Validation { message, errors } => json!({
                "message": message,
                "errors": errors,
            }),
            other => json!({ "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::IdentifierError;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(resp: Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_directory_error_status_mapping() {
        let cases = vec![
            (
                DirectoryError::MalformedIdentifier(IdentifierError::InvalidCountryCode(
                    "p".into(),
                )),
                StatusCode::BAD_REQUEST,
            ),
            (
                DirectoryError::Cancelled(CancelReason::DeadlineExceeded),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                DirectoryError::Cancelled(CancelReason::Canceled),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (DirectoryError::AlreadyExists("ALBPPLPWXXX".into()), StatusCode::CONFLICT),
            (DirectoryError::NotFound("ALBPPLPWXXX".into()), StatusCode::NOT_FOUND),
            (
                DirectoryError::Store(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn test_message_body() {
        let resp =
            ApiError::from(DirectoryError::AlreadyExists("ALBPPLPWXXX".into())).into_response();

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "the SWIFT code ALBPPLPWXXX already exists");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let mut errors = BTreeMap::new();
        errors.insert("swiftCode".to_string(), "field is required".to_string());
        let err = ValidationErrors { errors };

        let body = body_json(ApiError::from(err).into_response()).await;

        assert_eq!(body["errors"]["swiftCode"], "field is required");
        assert!(body["message"].as_str().unwrap().contains("swiftCode"));
    }
}
