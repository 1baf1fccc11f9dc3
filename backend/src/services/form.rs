//! Reading of the multipart form shared by both template endpoints.
//!
//! Fields are streamed chunk by chunk and buffered in memory. The combined
//! size of all fields is capped by `ServerConfig::max_upload_bytes`. Unknown
//! fields are drained and discarded. When a field is sent twice the last one
//! wins.

use super::error::ApiError;
use actix_multipart::{Field, Multipart};
use common::requests::{FILE_FIELD, VALUES_FIELD};
use futures_util::StreamExt;

/// The uploaded template.
pub struct UploadedFile {
    /// Client supplied file name, only used for logging.
    pub name: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

#[derive(Default)]
pub struct TemplateForm {
    pub file: Option<UploadedFile>,
    pub values: Option<String>,
}

impl TemplateForm {
    pub fn require_file(&mut self) -> Result<UploadedFile, ApiError> {
        self.file.take().ok_or(ApiError::MissingField(FILE_FIELD))
    }

    pub fn require_values(&mut self) -> Result<String, ApiError> {
        self.values.take().ok_or(ApiError::MissingField(VALUES_FIELD))
    }
}

pub async fn read_template_form(mut payload: Multipart, limit: usize) -> Result<TemplateForm, ApiError> {
    let mut form = TemplateForm::default();
    let mut total = 0;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let (name, filename) = field
            .content_disposition()
            .map(|cd| {
                (
                    cd.get_name().map(|n| n.to_string()),
                    cd.get_filename().map(|f| f.to_string()),
                )
            })
            .unwrap_or_default();

        let bytes = read_field(&mut field, &mut total, limit).await?;
        match name.as_deref() {
            Some(FILE_FIELD) => {
                form.file = Some(UploadedFile {
                    name: filename,
                    bytes,
                });
            }
            Some(VALUES_FIELD) => {
                let text = String::from_utf8(bytes)
                    .map_err(|_| ApiError::InvalidEncoding(VALUES_FIELD))?;
                form.values = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field, total: &mut usize, limit: usize) -> Result<Vec<u8>, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        *total += chunk.len();
        if *total > limit {
            return Err(ApiError::PayloadTooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
