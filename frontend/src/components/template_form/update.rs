//! Update function for the template form component.
//!
//! Elm-style: receives the component, the `Context` and a `Msg`, moves the
//! workflow to its next state and returns whether the view must re-render.
//! Network calls run in `spawn_local` and report back through messages.
//! Failures never change the visible state; they are only written to the
//! browser console.

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::helpers::{request_document, request_keys, trigger_download};
use super::messages::Msg;
use super::state::TemplateFormComponent;

pub fn update(
    component: &mut TemplateFormComponent,
    ctx: &Context<TemplateFormComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::FileChanged(Some(file)) => {
            component.transition(|state| state.select_file(file));
            true
        }
        Msg::FileChanged(None) => false,
        Msg::SubmitDiscovery => {
            let file = match component.workflow.discovery_file() {
                Ok(file) => file.clone(),
                Err(e) => {
                    error!(e.to_string());
                    return false;
                }
            };

            let link = ctx.link().clone();
            spawn_local(async move {
                let result = request_keys(&file).await;
                match result {
                    Ok(keys) => link.send_message(Msg::KeysLoaded { file, keys }),
                    Err(e) => link.send_message(Msg::RequestFailed(format!(
                        "Error uploading file and parsing placeholders: {}",
                        e
                    ))),
                }
            });
            false
        }
        Msg::KeysLoaded { file, keys } => {
            component.transition(|state| state.keys_discovered(&file, keys));
            true
        }
        Msg::ValueChanged { code, value } => {
            component.transition(|state| state.set_value(code, value));
            true
        }
        Msg::SubmitGeneration => {
            let request = match component.workflow.generation_request() {
                Ok(request) => request,
                Err(e) => {
                    error!(e.to_string());
                    return false;
                }
            };
            component.transition(|state| state.start_download());

            let link = ctx.link().clone();
            spawn_local(async move {
                let filename = request.file.name();
                let result = request_document(&request.file, &request.values_json)
                    .await
                    .and_then(|bytes| trigger_download(&bytes, &filename));
                if let Err(e) = result {
                    link.send_message(Msg::RequestFailed(format!("Error uploading file: {}", e)));
                }
                link.send_message(Msg::DownloadFinished);
            });
            true
        }
        Msg::DownloadFinished => {
            component.transition(|state| state.download_finished());
            true
        }
        Msg::RequestFailed(message) => {
            error!(message);
            false
        }
    }
}
