//! Error type of the HTTP API.
//!
//! Every error is rendered as a JSON document `{"statusCode": .., "message": ..}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

use crate::model::{AccountId, ValidationError};
use crate::service::AccountError;

/// HTTP API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The account does not pass validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request path or body cannot be parsed.
    #[error("{0}")]
    MalformedRequest(String),

    /// No account exists with the given identifier.
    #[error("Id not found {0}")]
    NotFound(AccountId),

    /// Any other failure, most probably coming from the storage.
    #[error("{0:#}")]
    Internal(anyhow::Error),
}

/// The JSON body of an error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// The HTTP status code, repeated in the body.
    pub status_code: u16,

    /// The error message.
    pub message: String,
}

impl ApiError {
    /// The status code of the response for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Service errors carry their typed cause inside an [anyhow::Error], get it
/// back to choose the right response.
impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<ValidationError>() {
            Ok(validation_error) => return ApiError::Validation(validation_error),
            Err(error) => error,
        };

        match error.downcast::<AccountError>() {
            Ok(AccountError::NotFound(id)) => ApiError::NotFound(id),
            Err(error) => ApiError::Internal(error),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

/// A service call running on the blocking pool panicked or was cancelled.
impl From<JoinError> for ApiError {
    fn from(error: JoinError) -> Self {
        let error = anyhow::Error::new(error).context("Service call failed");

        ApiError::Internal(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            status_code: status.as_u16(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_validation_error_from_anyhow() {
        let error: ApiError = anyhow!(ValidationError::BlankName).into();

        assert!(matches!(error, ApiError::Validation(ValidationError::BlankName)));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "[name] cannot be blank");
    }

    #[test]
    fn test_not_found_from_anyhow() {
        let error: ApiError = anyhow!(AccountError::NotFound(7)).into();

        assert!(matches!(error, ApiError::NotFound(7)));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Id not found 7");
    }

    #[test]
    fn test_other_errors_are_internal() {
        let error: ApiError = anyhow!("disk on fire").into();

        assert!(matches!(error, ApiError::Internal(_)));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "disk on fire");
    }

    #[test]
    fn test_error_body_field_names() {
        let body = ErrorBody {
            status_code: 400,
            message: "[name] cannot be blank".to_string(),
        };

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"statusCode": 400, "message": "[name] cannot be blank"})
        );
    }
}
