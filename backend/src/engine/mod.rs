//! # Templating Engine
//!
//! The capability both API endpoints delegate to. It is exposed as the
//! `TemplateEngine` trait so the HTTP layer never touches the document format
//! and tests can swap in a stub that returns fixed descriptors or bytes.
//!
//! ## Sub-modules:
//! - `command`: Classifies the text found between delimiters (`INS`, `FOR`, ...).
//! - `docx`: `DocxEngine`, the implementation for Word `.docx` archives.
//! - `error`: `EngineError`, every way listing or rendering can fail.
//! - `xml`: Paragraph/run scanning and rewriting of WordprocessingML parts.

mod command;
mod docx;
mod error;
mod xml;

#[cfg(test)]
pub(crate) mod fixtures;

use common::model::placeholder::PlaceholderDescriptor;
use common::model::values::ValueMap;

pub use docx::DocxEngine;
pub use error::EngineError;

/// Open/close token pair surrounding a command in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: &'static str,
    pub close: &'static str,
}

/// Delimiters used by every endpoint. Discovery and generation must agree on
/// them or discovered codes will not match during rendering.
pub const CMD_DELIMITERS: Delimiters = Delimiters {
    open: "{",
    close: "}",
};

/// Lists and renders the commands of a template document.
///
/// Implementations are called from the blocking thread pool and must be
/// shareable across actix workers.
pub trait TemplateEngine: Send + Sync {
    /// Returns one descriptor per distinct command code, in the order the
    /// commands first appear in the document.
    fn list_placeholders(
        &self,
        document: &[u8],
        delimiters: Delimiters,
    ) -> Result<Vec<PlaceholderDescriptor>, EngineError>;

    /// Returns a copy of `document` with every command replaced by its value.
    fn render(
        &self,
        document: &[u8],
        values: &ValueMap,
        delimiters: Delimiters,
    ) -> Result<Vec<u8>, EngineError>;
}
