use parking_lot::RwLock;
use std::collections::HashMap;

use super::KeyValueStore;

/// In-process store for tests and for hosts that opt out of durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bools: RwLock<HashMap<String, bool>>,
    strings: RwLock<HashMap<String, String>>,
    lists: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_bool(&self, key: &str) -> bool {
        self.bools.read().get(key).copied().unwrap_or(false)
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.bools.write().insert(key.to_string(), value);
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.read().get(key).cloned()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.strings.write().insert(key.to_string(), value.to_string());
    }

    fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        self.lists.read().get(key).cloned()
    }

    fn set_string_list(&self, key: &str, value: &[String]) {
        self.lists.write().insert(key.to_string(), value.to_vec());
    }

    fn remove(&self, key: &str) {
        self.bools.write().remove(key);
        self.strings.write().remove(key);
        self.lists.write().remove(key);
    }
}
