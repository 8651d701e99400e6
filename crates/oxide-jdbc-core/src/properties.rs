//! Driver connection properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String-keyed property bag handed to [`Driver::connect`](crate::Driver::connect).
///
/// Iteration order is sorted by key, so two bags with the same entries
/// always render the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionProperties {
    entries: BTreeMap<String, String>,
}

impl ConnectionProperties {
    /// Creates an empty property bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Sets a property, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value of a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over the property names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns a copy of `self` with `overrides` applied on top.
    #[must_use]
    pub fn merged_with<'a, I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut merged = self.clone();
        merged.extend(overrides.into_iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

impl Extend<(String, String)> for ConnectionProperties {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_set_replaces_value() {
        let mut props = ConnectionProperties::new();
        assert!(props.is_empty());
        assert_eq!(props.set("user", "sa"), None);
        assert_eq!(props.set("user", "admin"), Some("sa".to_string()));
        assert_eq!(props.get("user"), Some("admin"));
        assert_eq!(props.len(), 1);
        assert!(!props.is_empty());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut props = ConnectionProperties::new();
        props.set("transactionIsolation", "2");
        props.set("appName", "oxide");
        props.set("nullCatalogMeansCurrent", "false");
        let keys: Vec<_> = props.keys().collect();
        assert_eq!(
            keys,
            vec!["appName", "nullCatalogMeansCurrent", "transactionIsolation"]
        );
    }

    #[test]
    fn test_merge_overrides_without_touching_base() {
        let mut base = ConnectionProperties::new();
        base.set("user", "sa");
        base.set("domain", "CORP");

        let mut split = HashMap::new();
        split.insert("user".to_string(), "reader".to_string());
        split.insert("instance".to_string(), "SQLEXPRESS".to_string());

        let merged = base.merged_with(&split);
        assert_eq!(merged.get("user"), Some("reader"));
        assert_eq!(merged.get("domain"), Some("CORP"));
        assert_eq!(merged.get("instance"), Some("SQLEXPRESS"));

        assert_eq!(base.get("user"), Some("sa"));
        assert_eq!(base.get("instance"), None);
        assert_eq!(base.len(), 2);
    }
}
