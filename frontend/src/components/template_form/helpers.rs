//! Browser side effects of the template form.
//!
//! - **Requests**: Building the multipart bodies and calling both endpoints with
//!   `gloo-net`. Non-2xx answers are turned into an error carrying the status
//!   and the server's plain-text message.
//! - **Download**: Turning the rendered bytes into a `Blob` and saving it through a
//!   temporary `<a download>` element that is removed right after the click.
//!   The object URL is revoked a little later so the browser can start reading it.

use common::model::placeholder::PlaceholderDescriptor;
use common::requests::{
    KeysResponse, DOCX_CONTENT_TYPE, FILE_FIELD, KEYS_PATH, PLACEHOLDER_PATH, VALUES_FIELD,
};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, File, FormData, HtmlAnchorElement, Url};

/// Delay before the object URL of a finished download is released.
const REVOKE_DELAY_MS: u32 = 1000;

/// Sends the template to the discovery endpoint.
pub async fn request_keys(file: &File) -> Result<Vec<PlaceholderDescriptor>, String> {
    let form = file_form(file)?;
    let response = post_form(KEYS_PATH, form).await?;
    let body: KeysResponse = response.json().await.map_err(|e| e.to_string())?;
    Ok(body.keys)
}

/// Sends the template and the JSON encoded values to the generation endpoint.
pub async fn request_document(file: &File, values_json: &str) -> Result<Vec<u8>, String> {
    let form = file_form(file)?;
    form.append_with_str(VALUES_FIELD, values_json)
        .map_err(js_error)?;
    let response = post_form(PLACEHOLDER_PATH, form).await?;
    response.binary().await.map_err(|e| e.to_string())
}

fn file_form(file: &File) -> Result<FormData, String> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(js_error)?;
    Ok(form)
}

async fn post_form(path: &str, form: FormData) -> Result<Response, String> {
    let response = Request::post(path)
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.ok() {
        Ok(response)
    } else {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        Err(format!("{} {}", status, message))
    }
}

/// Saves `bytes` as a Word document named `filename`.
pub fn trigger_download(bytes: &[u8], filename: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document available")?;
    let body = document.body().ok_or("No body element")?;

    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(DOCX_CONTENT_TYPE);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "Could not create download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").ok();

    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_error)?;

    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(REVOKE_DELAY_MS).await;
        let _ = Url::revoke_object_url(&url);
    });
    Ok(())
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
