//! # Error Types Module
//!
//! Error types for the prediction pipeline. The service side maps each
//! variant to an HTTP status and a `{"error": ...}` body; the client side
//! enumerates the ways a call to the service can fail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const MISSING_IMAGE_MESSAGE: &str = "No image uploaded!";
pub const EMPTY_FILENAME_MESSAGE: &str = "No selected file!";

/// Errors raised while serving a `/predict` request
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The request carried no `image` file field
    MissingImage,
    /// The `image` field was present but its filename was empty
    EmptyFilename,
    /// The multipart stream could not be read
    InvalidUpload(String),
    /// The uploaded bytes are not a decodable image
    Decode(String),
    /// Anything else that went wrong during processing
    Internal(String),
}

impl PredictionError {
    /// HTTP status the error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictionError::MissingImage
            | PredictionError::EmptyFilename
            | PredictionError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            PredictionError::Decode(_) | PredictionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for PredictionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionError::MissingImage => write!(f, "{MISSING_IMAGE_MESSAGE}"),
            PredictionError::EmptyFilename => write!(f, "{EMPTY_FILENAME_MESSAGE}"),
            PredictionError::InvalidUpload(msg) => write!(f, "Invalid upload: {msg}"),
            PredictionError::Decode(msg) => write!(f, "Image decode error: {msg}"),
            PredictionError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for PredictionError {}

impl From<image::ImageError> for PredictionError {
    fn from(err: image::ImageError) -> Self {
        PredictionError::Decode(err.to_string())
    }
}

impl From<tokio::task::JoinError> for PredictionError {
    fn from(err: tokio::task::JoinError) -> Self {
        PredictionError::Internal(err.to_string())
    }
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Errors raised by the bot's HTTP client when calling the prediction service
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout, ...)
    Transport(String),
    /// The service answered with a non-success status
    Rejected { status: u16, body: String },
    /// The service answered 2xx but the body was not the expected JSON
    MalformedResponse(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "Transport error: {msg}"),
            ClientError::Rejected { status, body } => {
                write!(f, "Prediction service returned {status}: {body}")
            }
            ClientError::MalformedResponse(msg) => write!(f, "Malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
