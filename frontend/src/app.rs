use crate::components::template_form::TemplateFormComponent;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <main style="min-height:100vh;display:flex;align-items:center;justify-content:center;font-family:Arial, sans-serif;">
                <TemplateFormComponent />
            </main>
        }
    }
}
