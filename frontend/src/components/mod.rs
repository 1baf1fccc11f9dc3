pub mod template_form;
