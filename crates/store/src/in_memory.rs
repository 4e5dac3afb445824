//! In-memory backend for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::backend::StoreBackend;

/// Volatile backend holding payloads in a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for InMemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn put(&self, key: &str, payload: String) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), payload);
        }
    }

    fn clear(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.clear();
        }
    }
}
