use serde::{Deserialize, Serialize};

/// A single command found between the placeholder delimiters of a template.
///
/// Produced by the backend's templating engine on `POST /api/keys` and sent to
/// the browser inside a `KeysResponse`. The frontend renders one input per
/// descriptor and uses `code` both as the list key and as the key of the value
/// sent back on `POST /api/placeholder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderDescriptor {
    /// The command text exactly as written between the delimiters (trimmed).
    pub raw: String,
    /// The command kind, e.g. `INS` for a plain substitution.
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier used to look up the replacement value. Unique per template.
    pub code: String,
}

impl PlaceholderDescriptor {
    pub fn new(raw: impl Into<String>, kind: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: kind.into(),
            code: code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kind_under_type_key() {
        let descriptor = PlaceholderDescriptor::new("name", "INS", "name");
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "raw": "name", "type": "INS", "code": "name" })
        );
    }
}
