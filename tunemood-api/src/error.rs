//! Error types for tunemood-api
//!
//! Every failure leaves the service as `{"error": "<message>"}` with the
//! status below. Internal detail is logged where the error is raised and
//! never copied into 500 bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::UploadError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-POST request to an upload route (405)
    #[error("Method not allowed. Only POST requests are supported.")]
    MethodNotAllowed,

    /// Unknown route (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// No file part named `audio` (400)
    #[error("No audio file provided. Please upload an MP3 file under the key \"audio\".")]
    MissingFile,

    /// Neither media type nor extension marks the file as audio (400)
    #[error("Invalid file type. Please upload an audio file (MP3, WAV, etc.).")]
    InvalidFileType,

    /// Body exceeded the upload cap (413)
    #[error("File too large. Maximum file size is {}.", format_limit(.limit_bytes))]
    PayloadTooLarge { limit_bytes: u64 },

    /// Feature extractor failed (500)
    #[error("Failed to analyze audio file. Please try again.")]
    AnalysisFailed,

    /// Multipart parse (including an empty file part), staging or other
    /// internal failure (500)
    #[error("Internal server error. Please try again.")]
    Internal,
}

/// Render a byte cap as whole MB when it is one (the default 50 MiB reads "50MB")
fn format_limit(limit_bytes: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    let limit_bytes = *limit_bytes;
    if limit_bytes >= MIB && limit_bytes % MIB == 0 {
        format!("{}MB", limit_bytes / MIB)
    } else {
        format!("{} bytes", limit_bytes)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingFile | ApiError::InvalidFileType => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::AnalysisFailed | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { limit_bytes } => ApiError::PayloadTooLarge { limit_bytes },
            UploadError::MissingFile => ApiError::MissingFile,
            UploadError::EmptyFile | UploadError::Parse(_) | UploadError::Io(_) => {
                error!(error = %err, "Error processing upload");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
