use thiserror::Error;

/// Errors raised while listing or rendering a template.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid template archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Template is missing the `{0}` part")]
    MissingPart(&'static str),

    #[error("Could not process part `{part}`: {source}")]
    Part {
        part: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unterminated command near `{fragment}`")]
    UnterminatedCommand { fragment: String },

    #[error("Empty command in template")]
    EmptyCommand,

    #[error("Unsupported command {kind} in `{raw}`")]
    UnsupportedCommand { kind: &'static str, raw: String },
}
