use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use tiny_core::ConversionError;
use tiny_model::{
    CONVERSION_FAILED, ErrorResponse, INVALID_MULTIPART, NO_FILE_UPLOADED,
    UPLOAD_TOO_LARGE,
};

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by API handlers, rendered as
/// `{ "error": <message>, "details"?: <details> }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, message)
    }

    pub fn no_file_uploaded() -> Self {
        Self::bad_request(NO_FILE_UPLOADED)
    }

    /// The codec's message is passed through verbatim.
    pub fn conversion_failed(err: &ConversionError) -> Self {
        Self::internal(CONVERSION_FAILED).with_details(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });

        (self.status, body).into_response()
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::bad_request(INVALID_MULTIPART).with_details(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::payload_too_large(UPLOAD_TOO_LARGE)
                .with_details(err.body_text())
        } else {
            Self::bad_request(INVALID_MULTIPART).with_details(err.body_text())
        }
    }
}
