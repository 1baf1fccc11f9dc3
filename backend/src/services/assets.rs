//! Frontend assets compiled into the binary.
//!
//! `build.rs` copies the trunk output to `static/dist`. Client routes (paths
//! without a file extension) are answered with `index.html`; a missing file
//! such as a stale `.wasm` name is a plain 404.

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use mime_guess::{from_path, Mime};
use std::path::Path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

/// Bytes and MIME type of the embedded file answering `path`.
fn embedded_asset(path: &str) -> Option<(&'static [u8], Mime)> {
    let path = path.trim_start_matches('/');
    let name = if path.is_empty() { INDEX } else { path };

    if let Some(file) = STATIC_DIR.get_file(name) {
        return Some((file.contents(), from_path(name).first_or_octet_stream()));
    }
    if Path::new(name).extension().is_some() {
        return None;
    }
    STATIC_DIR
        .get_file(INDEX)
        .map(|index| (index.contents(), mime_guess::mime::TEXT_HTML_UTF_8))
}

/// Default service of the app.
pub async fn serve(req: HttpRequest) -> HttpResponse {
    match embedded_asset(req.path()) {
        Some((contents, mime)) => HttpResponse::Ok()
            .insert_header(ContentType(mime))
            .body(contents),
        None => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Not Found"),
    }
}
