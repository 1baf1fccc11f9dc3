use crate::engine::EngineError;
use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Everything that can go wrong while serving a template request.
///
/// The variants only exist for logging; clients always receive
/// `500 Internal Server Error` with the message as a plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing form field `{0}`")]
    MissingField(&'static str),

    #[error("Form field `{0}` is not valid UTF-8")]
    InvalidEncoding(&'static str),

    #[error("Invalid values: {0}")]
    InvalidValues(#[from] serde_json::Error),

    #[error("Upload exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Error reading form data: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Template worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
