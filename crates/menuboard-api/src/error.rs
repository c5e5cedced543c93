//! HTTP error mapping
//!
//! Every failure leaves the API as `{"error": <code>, "message": <text>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use menuboard_core::DomainError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request ({0}): {1}")]
    BadRequest(&'static str, String),

    #[error("Unauthorized ({0}): {1}")]
    Unauthorized(&'static str, String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Bad gateway ({0}): {1}")]
    BadGateway(&'static str, String),

    #[error("Service unavailable ({0}): {1}")]
    ServiceUnavailable(&'static str, String),

    #[error("Internal error ({0}): {1}")]
    InternalError(&'static str, String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    /// Map a domain failure; `fallback` names unexpected server-side errors
    /// for the endpoint (`read_failed`, `write_failed`, ...).
    pub fn from_domain(err: DomainError, fallback: &'static str) -> Self {
        let message = err.to_string();
        match err {
            DomainError::InvalidPayload(_) => ApiError::BadRequest("invalid_payload", message),
            DomainError::DuplicateId { .. } => ApiError::BadRequest("duplicate_id", message),
            DomainError::ValidationError(_) => ApiError::BadRequest("validation_failed", message),
            DomainError::InvalidCredentials => ApiError::Unauthorized("invalid_password", message),
            DomainError::InvalidToken => ApiError::Unauthorized("invalid_token", message),
            DomainError::NotConfigured(_) => ApiError::InternalError("server_not_configured", message),
            DomainError::InvalidDataUrl => ApiError::BadRequest("invalid_data_url", message),
            DomainError::UnsupportedImageType(_) => {
                ApiError::BadRequest("unsupported_image_type", message)
            }
            DomainError::EmptyImage => ApiError::BadRequest("empty_image", message),
            DomainError::ImageTooLarge { .. } => ApiError::PayloadTooLarge(message),
            DomainError::MissingName => ApiError::BadRequest("missing_name", message),
            DomainError::AiNotConfigured => ApiError::ServiceUnavailable("ai_not_configured", message),
            DomainError::NoImage => ApiError::BadGateway("no_image", message),
            DomainError::NotFound(_)
            | DomainError::StorageError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::AiFailed(_)
            | DomainError::InternalError(_) => ApiError::InternalError(fallback, message),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(..) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(..) => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadGateway(..) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(..) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(code, _)
            | ApiError::Unauthorized(code, _)
            | ApiError::BadGateway(code, _)
            | ApiError::ServiceUnavailable(code, _)
            | ApiError::InternalError(code, _) => code,
            ApiError::PayloadTooLarge(_) => "image_too_large",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            ApiError::BadRequest(_, msg)
            | ApiError::Unauthorized(_, msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::BadGateway(_, msg)
            | ApiError::ServiceUnavailable(_, msg)
            | ApiError::InternalError(_, msg) => msg,
        };

        if status.is_server_error() {
            tracing::error!(code, "{}", message);
        } else {
            tracing::warn!(code, "{}", message);
        }

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
