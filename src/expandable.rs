//! Extraction of `expand*` flags into `expand[n]` query parameters.
//!
//! A GET input opts into related data with boolean fields such as
//! `expandStageHistory`. The API expects those as an indexed list,
//! `expand[0]=StageHistory&expand[1]=Items`, instead of the flags themselves.

use serde_json::{Map, Value};

#[cfg(test)]
mod tests;

/// Key prefix marking an expandable flag.
pub const EXPAND_PREFIX: &str = "expand";

/// A selected expandable: the source key and the name sent to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expandable {
    /// Key of the flag in the serialized input.
    pub key: String,
    /// Key with the prefix removed.
    pub name: String,
}

/// Selects every key carrying the prefix whose value is `true`, in map order.
#[must_use]
pub fn extract(data: &Map<String, Value>) -> Vec<Expandable> {
    data.iter()
        .filter(|(_, value)| matches!(value, Value::Bool(true)))
        .filter_map(|(key, _)| {
            let name = key.strip_prefix(EXPAND_PREFIX)?;
            (!name.is_empty()).then(|| Expandable {
                key: key.clone(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Removes every prefixed key from `data` and returns the selected
/// expandables as `(expand[n], name)` pairs.
pub fn take_parameters(data: &mut Map<String, Value>) -> Vec<(String, String)> {
    let selected = extract(data);
    data.retain(|key, _| !key.starts_with(EXPAND_PREFIX));

    selected
        .into_iter()
        .enumerate()
        .map(|(index, expandable)| (format!("{EXPAND_PREFIX}[{index}]"), expandable.name))
        .collect()
}
