pub mod placeholder;
pub mod values;
