//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use listkit_export::ExportError;
use listkit_models::ValidationResult;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported channel: {requested}")]
    UnsupportedChannel {
        requested: String,
        supported: Vec<String>,
    },

    #[error("Listing is not ready for export")]
    ValidationFailed { validation: ValidationResult },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_)
            | ApiError::UnsupportedChannel { .. }
            | ApiError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NotFound(msg) => ApiError::NotFound(msg),
            ExportError::Validation { result } => ApiError::ValidationFailed { validation: result },
            ExportError::UnsupportedChannel {
                requested,
                supported,
            } => ApiError::UnsupportedChannel {
                requested,
                supported,
            },
            ExportError::GenerationUnsupported { slug } => ApiError::BadRequest(format!(
                "Flat-file generation is not yet implemented for channel '{slug}'"
            )),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    supported_channels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<ValidationResult>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = match &self {
            ApiError::Internal(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        let (supported_channels, validation) = match self {
            ApiError::UnsupportedChannel { supported, .. } => (Some(supported), None),
            ApiError::ValidationFailed { validation } => (None, Some(validation)),
            _ => (None, None),
        };

        let body = ErrorResponse {
            success: false,
            detail,
            supported_channels,
            validation,
        };

        (status, Json(body)).into_response()
    }
}
