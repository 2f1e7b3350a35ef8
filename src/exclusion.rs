//! Tag-based opt-out from the stop action.

use std::collections::{BTreeMap, BTreeSet};

/// Returns true when `tags` carries `exclude_key` with a value in `exempt_values`.
///
/// Matching is case-sensitive and exact. An empty `exempt_values` never excludes anything.
pub fn is_excluded(
    tags: &BTreeMap<String, String>,
    exclude_key: &str,
    exempt_values: &BTreeSet<String>,
) -> bool {
    if exempt_values.is_empty() {
        return false;
    }

    tags.get(exclude_key)
        .is_some_and(|value| exempt_values.contains(value))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    key: String,
    values: BTreeSet<String>,
}

impl ExclusionRule {
    /// Values are trimmed and blank entries dropped, so `"prod, ,dev"` yields `{prod, dev}`.
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();

        Self {
            key: key.into(),
            values,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &BTreeSet<String> {
        &self.values
    }

    pub fn excludes_nothing(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_excluded(&self, tags: &BTreeMap<String, String>) -> bool {
        is_excluded(tags, &self.key, &self.values)
    }
}
