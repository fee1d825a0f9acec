use crate::auth::AuthError;
use crate::handlers::validation::plausibility::CheckError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Errors returned by HTTP handlers.
///
/// Every variant renders as
/// `{ "success": false, "error": CODE, "message": text }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.code(),
            "message": self.to_string(),
        }))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotConfigured => ApiError::Unavailable("Admin login is not configured".into()),
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::MissingToken => ApiError::Unauthorized("No token provided".into()),
            AuthError::InvalidToken(_) => ApiError::Unauthorized("Invalid token".into()),
            AuthError::Signing(e) => ApiError::Internal(format!("Token signing failed: {e}")),
            AuthError::Lifetime(_) => ApiError::Internal("Token lifetime is misconfigured".into()),
        }
    }
}

impl From<CheckError> for ApiError {
    fn from(_: CheckError) -> Self {
        ApiError::Unavailable("Email verification is temporarily unavailable".into())
    }
}
