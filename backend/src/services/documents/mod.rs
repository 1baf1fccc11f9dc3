//! # Document Service Module
//!
//! Groups the two endpoints of the fill-in workflow under `/api`. Both accept
//! `multipart/form-data`, keep nothing between requests and answer any failure
//! with `500 Internal Server Error` and a plain-text message.
//!
//! ## Sub-modules:
//! - `keys`: Lists the placeholders found in an uploaded template.
//! - `placeholder`: Renders an uploaded template with user supplied values.

mod keys;
mod placeholder;

use actix_web::web::{post, scope};
use actix_web::Scope;

/// The base path for all document endpoints.
const API_PATH: &str = "/api";

/// Configures and returns the Actix `Scope` for the document routes.
///
/// # Registered Routes:
///
/// *   **`POST /keys`**:
///     - **Handler**: `keys::process`
///     - **Description**: Expects a `file` field. Returns `{"keys": [{"raw", "type", "code"}]}`
///       listing every distinct placeholder in document order.
///
/// *   **`POST /placeholder`**:
///     - **Handler**: `placeholder::process`
///     - **Description**: Expects a `file` field and a `values` field holding a JSON object of
///       strings keyed by placeholder code. Returns the rendered Word document.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/keys", post().to(keys::process))
        .route("/placeholder", post().to(placeholder::process))
}
