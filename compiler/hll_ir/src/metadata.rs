//! Per-node annotation store.
//!
//! Passes stash auxiliary information (source addresses, emitter hints,
//! comments) under string keys without extending the node hierarchy.
//! Metadata is copied by `clone_value` and ignored by `is_equal_to`.

use rustc_hash::FxHashMap;

/// String-keyed annotations attached to a node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: FxHashMap<String, String>,
}

impl Metadata {
    /// Create an empty store.
    #[inline]
    pub fn new() -> Self {
        Metadata::default()
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key, for deterministic output.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut meta = Metadata::new();
        assert!(meta.is_empty());
        assert_eq!(meta.set("addr", "0x401000"), None);
        assert_eq!(meta.get("addr"), Some("0x401000"));
        assert_eq!(meta.set("addr", "0x401004"), Some("0x401000".to_string()));
        assert!(meta.contains("addr"));
        assert_eq!(meta.remove("addr"), Some("0x401004".to_string()));
        assert!(!meta.contains("addr"));
    }

    #[test]
    fn test_sorted() {
        let mut meta = Metadata::new();
        meta.set("b", "2");
        meta.set("a", "1");
        assert_eq!(meta.sorted(), vec![("a", "1"), ("b", "2")]);
        assert_eq!(meta.len(), 2);
    }
}
