//! Tag sets attached to scenarios

use crate::node::Meta;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Metadata key holding a scenario's tags.
pub const TAGS_KEY: &str = "tags";

/// The tags attached to a scenario, read from `meta.tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the string items of `meta.tags`.
    ///
    /// Non-string items are skipped, as is a `tags` value that is not a list.
    pub fn from_meta(meta: Option<&Meta>) -> Self {
        let Some(Value::Array(items)) = meta.and_then(|m| m.get(TAGS_KEY)) else {
            return Self::default();
        };
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_string_items_only() {
        let meta = json!({"tags": ["smoke", 3, "smoke", "slow", null]});
        let tags = TagSet::from_meta(meta.as_object());
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["slow", "smoke"]);
    }

    #[test]
    fn missing_or_scalar_tags_are_empty() {
        assert!(TagSet::from_meta(None).is_empty());
        let meta = json!({"tags": "smoke"});
        assert!(TagSet::from_meta(meta.as_object()).is_empty());
    }
}
