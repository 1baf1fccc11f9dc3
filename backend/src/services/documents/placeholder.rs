//! # Document Generation Service
//!
//! Backend logic for `POST /api/placeholder`. Receives the template in the
//! `file` field and the JSON encoded value map in the `values` field, renders
//! the template on the blocking thread pool and streams the resulting `.docx`
//! back. Malformed `values` is an error, never an empty substitution.

use crate::config::ServerConfig;
use crate::engine::{TemplateEngine, CMD_DELIMITERS};
use crate::services::error::ApiError;
use crate::services::form::read_template_form;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::values::ValueMap;
use common::requests::DOCX_CONTENT_TYPE;
use log::{info, warn};

/// Actix web handler for `POST /api/placeholder`.
///
/// # Returns
/// - `200 OK` with the rendered document and the Word content type.
/// - `500 Internal Server Error` with the error message otherwise.
pub async fn process(
    payload: Multipart,
    engine: web::Data<dyn TemplateEngine>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match generate_document(payload, engine, &config).await {
        Ok(document) => HttpResponse::Ok()
            .content_type(DOCX_CONTENT_TYPE)
            .body(document),
        Err(e) => {
            warn!("Document generation failed: {}", e);
            e.error_response()
        }
    }
}

pub async fn generate_document(
    payload: Multipart,
    engine: web::Data<dyn TemplateEngine>,
    config: &ServerConfig,
) -> Result<Vec<u8>, ApiError> {
    let mut form = read_template_form(payload, config.max_upload_bytes).await?;
    let file = form.require_file()?;
    let values: ValueMap = serde_json::from_str(&form.require_values()?)?;
    info!(
        "Rendering {} ({} bytes) with {} values",
        file.display_name(),
        file.bytes.len(),
        values.len()
    );

    let engine = engine.into_inner();
    let document = tokio::task::spawn_blocking(move || {
        engine.render(&file.bytes, &values, CMD_DELIMITERS)
    })
    .await??;

    Ok(document)
}
