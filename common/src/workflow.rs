//! Client workflow for filling a template.
//!
//! The browser page moves through four states:
//!
//! ```text
//! NoFile -> Selected -> KeysReady <-> Downloading
//!    ^__________|___________|______________|   (picking a file restarts at Selected)
//! ```
//!
//! Every transition is a plain function consuming the old state and returning
//! the next one, so the whole flow can be exercised without a browser. The
//! state is generic over the file handle: the frontend uses `web_sys::File`,
//! tests use any cloneable, comparable value.

use crate::model::placeholder::PlaceholderDescriptor;
use crate::model::values::ValueMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState<F> {
    /// Nothing picked yet.
    NoFile,
    /// A template is picked but its placeholders are not known.
    Selected { file: F },
    /// Placeholders are known and the user is filling values.
    KeysReady {
        file: F,
        keys: Vec<PlaceholderDescriptor>,
        values: ValueMap,
    },
    /// A generation request is in flight.
    Downloading {
        file: F,
        keys: Vec<PlaceholderDescriptor>,
        values: ValueMap,
    },
}

/// Reasons a submission is rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("No file selected")]
    NoFileSelected,
    #[error("No placeholders discovered for the selected file")]
    NoPlaceholders,
    #[error("A download is already in progress")]
    DownloadInProgress,
    #[error("Could not encode values: {0}")]
    Encode(String),
}

/// Payload of the second phase: the original file plus the JSON encoded values.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest<F> {
    pub file: F,
    pub values_json: String,
}

impl<F> Default for WorkflowState<F> {
    fn default() -> Self {
        WorkflowState::NoFile
    }
}

impl<F: Clone + PartialEq> WorkflowState<F> {
    /// The file picker changed. Only the newest file is kept and anything
    /// discovered for a previous file is dropped.
    pub fn select_file(self, file: F) -> Self {
        WorkflowState::Selected { file }
    }

    pub fn file(&self) -> Option<&F> {
        match self {
            WorkflowState::NoFile => None,
            WorkflowState::Selected { file }
            | WorkflowState::KeysReady { file, .. }
            | WorkflowState::Downloading { file, .. } => Some(file),
        }
    }

    /// File to send to the discovery endpoint.
    pub fn discovery_file(&self) -> Result<&F, WorkflowError> {
        match self {
            WorkflowState::Downloading { .. } => Err(WorkflowError::DownloadInProgress),
            other => other.file().ok_or(WorkflowError::NoFileSelected),
        }
    }

    /// Discovery for `requested` succeeded. Values always start empty.
    /// Replies for a file that is no longer selected are dropped.
    pub fn keys_discovered(self, requested: &F, keys: Vec<PlaceholderDescriptor>) -> Self {
        match self {
            WorkflowState::Selected { file } | WorkflowState::KeysReady { file, .. }
                if &file == requested =>
            {
                WorkflowState::KeysReady {
                    file,
                    keys,
                    values: ValueMap::new(),
                }
            }
            other => other,
        }
    }

    /// Updates one entry of the value map, keeping every other entry.
    pub fn set_value(self, code: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            WorkflowState::KeysReady {
                file,
                keys,
                mut values,
            } => {
                values.insert(code.into(), value.into());
                WorkflowState::KeysReady { file, keys, values }
            }
            other => other,
        }
    }

    /// Builds the second phase request without changing state.
    pub fn generation_request(&self) -> Result<GenerationRequest<F>, WorkflowError> {
        match self {
            WorkflowState::NoFile => Err(WorkflowError::NoFileSelected),
            WorkflowState::Selected { .. } => Err(WorkflowError::NoPlaceholders),
            WorkflowState::Downloading { .. } => Err(WorkflowError::DownloadInProgress),
            WorkflowState::KeysReady { file, keys, values } => {
                if keys.is_empty() {
                    return Err(WorkflowError::NoPlaceholders);
                }
                let values_json = serde_json::to_string(values)
                    .map_err(|e| WorkflowError::Encode(e.to_string()))?;
                Ok(GenerationRequest {
                    file: file.clone(),
                    values_json,
                })
            }
        }
    }

    /// Marks the generation request as sent.
    pub fn start_download(self) -> Self {
        match self {
            WorkflowState::KeysReady { file, keys, values } if !keys.is_empty() => {
                WorkflowState::Downloading { file, keys, values }
            }
            other => other,
        }
    }

    /// The generation request completed, successfully or not.
    pub fn download_finished(self) -> Self {
        match self {
            WorkflowState::Downloading { file, keys, values } => {
                WorkflowState::KeysReady { file, keys, values }
            }
            other => other,
        }
    }

    pub fn keys(&self) -> &[PlaceholderDescriptor] {
        match self {
            WorkflowState::KeysReady { keys, .. } | WorkflowState::Downloading { keys, .. } => {
                keys
            }
            _ => &[],
        }
    }

    /// Current value bound to the input of `code`; empty when untouched.
    pub fn value_of(&self, code: &str) -> &str {
        match self {
            WorkflowState::KeysReady { values, .. } | WorkflowState::Downloading { values, .. } => {
                values.get(code).map(String::as_str).unwrap_or("")
            }
            _ => "",
        }
    }

    /// The value form is rendered only when at least one placeholder exists.
    pub fn shows_value_form(&self) -> bool {
        !self.keys().is_empty()
    }

    pub fn is_downloading(&self) -> bool {
        matches!(self, WorkflowState::Downloading { .. })
    }
}
