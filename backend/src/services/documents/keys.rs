//! # Placeholder Discovery Service
//!
//! Backend logic for `POST /api/keys`.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives a multipart form with a `file` field
//!     holding the Word template.
//!
//! 2.  **Form Reading**: The form is buffered in memory, bounded by the configured
//!     upload limit.
//!
//! 3.  **Discovery**: The template bytes are handed to the `TemplateEngine` on the
//!     blocking thread pool together with `CMD_DELIMITERS`.
//!
//! 4.  **HTTP Response**: `200 OK` with `{"keys": [...]}`, or `500 Internal Server Error`
//!     with the error message as plain text. Nothing is kept after the response.

use crate::config::ServerConfig;
use crate::engine::{TemplateEngine, CMD_DELIMITERS};
use crate::services::error::ApiError;
use crate::services::form::read_template_form;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::placeholder::PlaceholderDescriptor;
use common::requests::KeysResponse;
use log::{info, warn};

/// Actix web handler for `POST /api/keys`.
pub async fn process(
    payload: Multipart,
    engine: web::Data<dyn TemplateEngine>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match list_keys(payload, engine, &config).await {
        Ok(keys) => HttpResponse::Ok().json(KeysResponse { keys }),
        Err(e) => {
            warn!("Placeholder discovery failed: {}", e);
            e.error_response()
        }
    }
}

/// Reads the uploaded template and lists its placeholders.
pub async fn list_keys(
    payload: Multipart,
    engine: web::Data<dyn TemplateEngine>,
    config: &ServerConfig,
) -> Result<Vec<PlaceholderDescriptor>, ApiError> {
    let file = read_template_form(payload, config.max_upload_bytes)
        .await?
        .require_file()?;
    info!(
        "Listing placeholders of {} ({} bytes)",
        file.display_name(),
        file.bytes.len()
    );

    let engine = engine.into_inner();
    let keys = tokio::task::spawn_blocking(move || {
        engine.list_placeholders(&file.bytes, CMD_DELIMITERS)
    })
    .await??;

    Ok(keys)
}
