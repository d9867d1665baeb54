//! API error handling module
//!
//! Provides a unified error type for all API endpoints. Note that a
//! negative verification verdict is NOT an error: the verify endpoint
//! returns 200 with the verdict's own `success`/`error` fields. This
//! type covers the cases where no verdict could be produced at all.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// API error type with structured variants for different error categories
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request - client provided invalid input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found - requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error - unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Service unavailable - required service is not configured or available
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Authlink core error - error from the verification library
    #[error("Verification error: {0}")]
    Authlink(#[from] authlink_core::AuthlinkError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Authlink(e) => match e {
                authlink_core::AuthlinkError::MissingParameters => StatusCode::BAD_REQUEST,
                authlink_core::AuthlinkError::ConfigError(_) => StatusCode::SERVICE_UNAVAILABLE,
                authlink_core::AuthlinkError::HttpError(_)
                | authlink_core::AuthlinkError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
                authlink_core::AuthlinkError::NfcVerificationFailed(_)
                | authlink_core::AuthlinkError::BlockchainVerificationFailed(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            },
        }
    }

    /// Get the error code for programmatic error handling
    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Authlink(e) => match e {
                authlink_core::AuthlinkError::MissingParameters => "MISSING_PARAMETERS",
                authlink_core::AuthlinkError::ConfigError(_) => "CONFIG_ERROR",
                authlink_core::AuthlinkError::HttpError(_) => "UPSTREAM_ERROR",
                authlink_core::AuthlinkError::MalformedResponse(_) => "UPSTREAM_ERROR",
                authlink_core::AuthlinkError::NfcVerificationFailed(_) => "NFC_REJECTED",
                authlink_core::AuthlinkError::BlockchainVerificationFailed(_) => {
                    "REGISTRY_REJECTED"
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        match &self {
            Self::BadRequest(_) | Self::NotFound(_) => {
                tracing::warn!(status = %status, code = code, error = %message, "Client error");
            }
            Self::ServiceUnavailable(_) => {
                tracing::warn!(status = %status, code = code, error = %message, "Service unavailable");
            }
            Self::Internal(_) => {
                tracing::error!(status = %status, code = code, error = %message, "Server error");
            }
            Self::Authlink(_) => {
                tracing::error!(status = %status, code = code, error = %message, "Verification error");
            }
        }

        let body = serde_json::json!({
            "error": message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}
