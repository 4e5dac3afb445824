//! JSON-file backend: one document on disk holding every collection.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;
use tracing::warn;

use crate::backend::StoreBackend;

/// Durable backend persisting all payloads into a single JSON document.
///
/// The whole document is rewritten on every put. A file that cannot be read
/// or parsed is treated as empty (the caller sees defaults), never as an
/// error.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    inner: RwLock<BTreeMap<String, Value>>,
}

impl JsonFileBackend {
    /// Open the document at `path`, loading whatever is already there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let inner = RwLock::new(read_document(&path));
        Self { path, inner }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, map: &BTreeMap<String, Value>) {
        let payload = match serde_json::to_string_pretty(map) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not serialize store document");
                return;
            }
        };

        if let Err(err) = std::fs::write(&self.path, payload) {
            warn!(path = %self.path.display(), %err, "could not write store document; keeping previous file");
        }
    }
}

fn read_document(path: &Path) -> BTreeMap<String, Value> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read store document; starting empty");
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(map) => map,
        Err(err) => {
            warn!(path = %path.display(), %err, "store document corrupt; starting empty");
            BTreeMap::new()
        }
    }
}

impl StoreBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        let value = map.get(key)?;
        serde_json::to_string(value).ok()
    }

    fn put(&self, key: &str, payload: String) {
        let value: Value = match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, %err, "refusing to store non-JSON payload");
                return;
            }
        };

        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), value);
            self.persist(&map);
        }
    }

    fn clear(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.clear();
            self.persist(&map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("smartlearn-store-{tag}-{}.json", uuid::Uuid::now_v7()))
    }

    #[test]
    fn missing_file_starts_empty() {
        let path = temp_path("missing");
        let backend = JsonFileBackend::open(&path);

        assert_eq!(backend.get("users"), None);
    }

    #[test]
    fn payloads_survive_reopen() {
        let path = temp_path("reopen");

        {
            let backend = JsonFileBackend::open(&path);
            backend.put("subjects", r#"[{"id":"mat"}]"#.to_string());
        }

        let reopened = JsonFileBackend::open(&path);
        assert_eq!(reopened.get("subjects"), Some(r#"[{"id":"mat"}]"#.to_string()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_document_starts_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();

        let backend = JsonFileBackend::open(&path);
        assert_eq!(backend.get("users"), None);

        // Still writable after recovery.
        backend.put("users", "[]".to_string());
        assert_eq!(backend.get("users"), Some("[]".to_string()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn non_json_payload_is_refused() {
        let path = temp_path("refuse");
        let backend = JsonFileBackend::open(&path);

        backend.put("users", "not json".to_string());

        assert_eq!(backend.get("users"), None);
        let _ = std::fs::remove_file(&path);
    }
}
