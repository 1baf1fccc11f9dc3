//! Component state for the template form.
//!
//! All workflow data lives in `common::workflow::WorkflowState`, whose pure
//! transitions are unit tested in the `common` crate. The component only holds
//! it and swaps in the next state after each message.

use common::workflow::WorkflowState;
use web_sys::File;

pub struct TemplateFormComponent {
    /// Current phase of the upload/fill/download workflow.
    pub workflow: WorkflowState<File>,
}

impl TemplateFormComponent {
    pub fn new() -> Self {
        Self {
            workflow: WorkflowState::NoFile,
        }
    }

    /// Replaces the workflow with the state returned by `step`.
    pub fn transition(&mut self, step: impl FnOnce(WorkflowState<File>) -> WorkflowState<File>) {
        let current = std::mem::take(&mut self.workflow);
        self.workflow = step(current);
    }
}
