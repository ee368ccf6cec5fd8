//! # Key-Value Store
//!
//! Persistence goes through the narrow [`Store`] capability: string values
//! under string keys. Session and project persistence in
//! [`crate::file_io`] take a `&dyn Store` (or `&mut`) so tests can use
//! [`MemoryStore`] and the application can use
//! [`crate::file_io::FileStore`].
//!
//! Writes are last-writer-wins; there is no versioning.

use std::collections::BTreeMap;

use crate::errors::CalcResult;

/// Key holding the full application state record
pub const APP_STATE_KEY: &str = "app_state";

/// Key holding the standalone history record
pub const HISTORY_KEY: &str = "calculation_history";

/// Prefix for named project records
pub const PROJECT_KEY_PREFIX: &str = "project:";

/// Key for a named project
pub fn project_key(name: &str) -> String {
    format!("{}{}", PROJECT_KEY_PREFIX, name)
}

/// Get/set/delete by key.
pub trait Store {
    /// Value under `key`, or `None` if absent
    fn get(&self, key: &str) -> CalcResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> CalcResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> CalcResult<()>;

    /// All keys, sorted
    fn keys(&self) -> CalcResult<Vec<String>>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> CalcResult<()> {
        self.values.remove(key);
        Ok(())
    }

    fn keys(&self) -> CalcResult<Vec<String>> {
        Ok(self.values.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));

        store.set(&project_key("Annex"), "{}").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "project:Annex".to_string()]);

        store.delete("a").unwrap();
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }
}
