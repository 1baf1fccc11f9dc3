//! Template form: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `TemplateFormComponent`).
//! - Provide the `Component` implementation that delegates to `update::update` and `view::view`.
//!
//! The page runs in two phases. The picked template is first sent to
//! `/api/keys` to discover its placeholders; once values are typed in, the same
//! file goes to `/api/placeholder` and the rendered document is downloaded
//! under the original file name.

use yew::prelude::*;

mod helpers;
mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::TemplateFormComponent;

impl Component for TemplateFormComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        TemplateFormComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
