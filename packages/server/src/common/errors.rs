use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use telegram::TelegramError;
use thiserror::Error;

/// Errors returned by the HTTP API.
///
/// Rendered as `{"detail": "<message>"}` with the matching status code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Invalid phone number")]
    InvalidPhoneNumber,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Two-factor authentication required")]
    PasswordRequired,

    #[error("Phone number is not registered")]
    NotRegistered,

    #[error("No pending verification request for this phone number")]
    NoPendingRequest,

    #[error("Either target_username or target_phone is required")]
    MissingRecipient,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidPhoneNumber
            | ApiError::InvalidCode
            | ApiError::PasswordRequired
            | ApiError::NotRegistered
            | ApiError::NoPendingRequest
            | ApiError::MissingRecipient => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TelegramError> for ApiError {
    fn from(error: TelegramError) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(json!({ "detail": self.to_string() }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(ApiError::InvalidCode.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NoPendingRequest.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_telegram_errors_keep_their_text() {
        let err = ApiError::from(TelegramError::Connection("timed out".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Connection error: timed out");
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = ApiError::Unauthorized("Invalid API key").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    }
}
