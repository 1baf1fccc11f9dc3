use std::collections::BTreeMap;

/// Replacement values keyed by placeholder `code`.
///
/// A `BTreeMap` keeps the serialized `values` form field in a stable order.
/// Codes missing from the map render as empty text; codes unknown to the
/// template are ignored.
pub type ValueMap = BTreeMap<String, String>;
