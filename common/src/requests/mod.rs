use crate::model::placeholder::PlaceholderDescriptor;
use serde::{Deserialize, Serialize};

/// Endpoint listing the placeholders of an uploaded template.
pub const KEYS_PATH: &str = "/api/keys";

/// Endpoint rendering an uploaded template with a value map.
pub const PLACEHOLDER_PATH: &str = "/api/placeholder";

/// Multipart field carrying the template bytes (both endpoints).
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the JSON encoded `ValueMap`.
pub const VALUES_FIELD: &str = "values";

/// Content type of a generated Word document.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Response body of `POST /api/keys`.
pub struct KeysResponse {
    pub keys: Vec<PlaceholderDescriptor>,
}
