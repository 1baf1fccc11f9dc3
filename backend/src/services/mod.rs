pub mod assets;
pub mod documents;
mod error;
mod form;
