use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::StoreResult;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    bools: BTreeMap<String, bool>,

    #[serde(default)]
    strings: BTreeMap<String, String>,

    #[serde(default)]
    lists: BTreeMap<String, Vec<String>>,
}

/// File-backed store: one JSON document, rewritten atomically on every
/// mutation (temp file, then rename). The in-memory copy is authoritative for
/// the life of the process; an unreadable or corrupt file on open is treated
/// as empty.
pub struct JsonFileStore {
    path: PathBuf,
    document: Mutex<Document>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let document = match Self::read_document(&path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Could not read permission store {}: {e}", path.display());
                Document::default()
            }
        };
        Self {
            path,
            document: Mutex::new(document),
        }
    }

    fn read_document(path: &Path) -> StoreResult<Document> {
        if !path.exists() {
            return Ok(Document::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn persist(&self, document: &Document) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(document)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn mutate(&self, apply: impl FnOnce(&mut Document)) {
        let mut document = self.document.lock();
        apply(&mut document);
        if let Err(e) = self.persist(&document) {
            // Fail open: the value stays live in memory for this process.
            tracing::warn!("Could not write permission store {}: {e}", self.path.display());
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_bool(&self, key: &str) -> bool {
        self.document.lock().bools.get(key).copied().unwrap_or(false)
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.mutate(|doc| {
            doc.bools.insert(key.to_string(), value);
        });
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.document.lock().strings.get(key).cloned()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.mutate(|doc| {
            doc.strings.insert(key.to_string(), value.to_string());
        });
    }

    fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        self.document.lock().lists.get(key).cloned()
    }

    fn set_string_list(&self, key: &str, value: &[String]) {
        self.mutate(|doc| {
            doc.lists.insert(key.to_string(), value.to_vec());
        });
    }

    fn remove(&self, key: &str) {
        self.mutate(|doc| {
            doc.bools.remove(key);
            doc.strings.remove(key);
            doc.lists.remove(key);
        });
    }
}
