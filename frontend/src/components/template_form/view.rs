//! View rendering for the template form.
//!
//! The upload form is always visible. The value form appears only once the
//! selected template turned out to contain at least one placeholder, with one
//! input per placeholder keyed and hinted by its `code`.

use super::messages::Msg;
use super::state::TemplateFormComponent;
use common::model::placeholder::PlaceholderDescriptor;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

const PANEL_STYLE: &str =
    "display:flex;flex-direction:column;gap:24px;border:1px solid #000;padding:48px;";
const ROW_STYLE: &str = "display:flex;align-items:center;justify-content:space-between;gap:12px;";
const INPUT_STYLE: &str = "flex:1;padding:6px 8px;border:1px solid #ccc;border-radius:4px;";
const BUTTON_STYLE: &str =
    "padding:6px 16px;background:#111;color:#fff;border:none;border-radius:4px;cursor:pointer;";

pub fn view(component: &TemplateFormComponent, ctx: &Context<TemplateFormComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div style={PANEL_STYLE}>
            <h1 style="font-size:1.1rem;margin:0;">{"Upload file with placeholders (text in curly brackets)"}</h1>
            { build_upload_form(component, link) }
            {
                if component.workflow.shows_value_form() {
                    build_values_form(component, link)
                } else {
                    html! {}
                }
            }
        </div>
    }
}

/// File picker plus the button starting placeholder discovery.
fn build_upload_form(component: &TemplateFormComponent, link: &Scope<TemplateFormComponent>) -> Html {
    let no_file = component.workflow.file().is_none();

    html! {
        <form onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::SubmitDiscovery
        })}>
            <div style={ROW_STYLE}>
                <input
                    name="file"
                    type="file"
                    accept=".docx"
                    style={INPUT_STYLE}
                    onchange={link.callback(|e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::FileChanged(input.files().and_then(|files| files.get(0)))
                    })}
                />
                <button type="submit" style={BUTTON_STYLE} disabled={no_file}>{"Upload"}</button>
            </div>
        </form>
    }
}

/// One input per discovered placeholder and the download button.
fn build_values_form(component: &TemplateFormComponent, link: &Scope<TemplateFormComponent>) -> Html {
    let inputs = component
        .workflow
        .keys()
        .iter()
        .map(|key| value_input(component, link, key))
        .collect::<Html>();

    html! {
        <form onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::SubmitGeneration
        })}>
            <div style="display:flex;flex-direction:column;gap:24px;">
                <div style="display:flex;flex-direction:column;gap:12px;">
                    <h1 style="font-size:1.1rem;margin:0;">{"Enter values for placeholders"}</h1>
                    { inputs }
                </div>
                <button
                    type="submit"
                    style={format!("{}width:100%;", BUTTON_STYLE)}
                    disabled={component.workflow.is_downloading()}
                >
                    {"Download"}
                </button>
            </div>
        </form>
    }
}

fn value_input(
    component: &TemplateFormComponent,
    link: &Scope<TemplateFormComponent>,
    key: &PlaceholderDescriptor,
) -> Html {
    let code = key.code.clone();

    html! {
        <div key={key.code.clone()} style={ROW_STYLE}>
            <input
                style={INPUT_STYLE}
                placeholder={key.code.clone()}
                title={key.raw.clone()}
                value={component.workflow.value_of(&key.code).to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::ValueChanged { code: code.clone(), value: input.value() }
                })}
            />
        </div>
    }
}
