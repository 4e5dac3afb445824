//! Typed facade over a raw backend.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::backend::StoreBackend;
use crate::collection::Collection;

/// Handle every engine component loads and saves collections through.
///
/// `load` never fails: an absent collection yields its default (cold start),
/// a corrupt payload yields its default with a warning. `save` never fails
/// the caller either; a backend refusal is logged and the previous payload
/// stays in place. Cheap to clone and share.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StoreBackend>,
}

impl Store {
    pub fn open(backend: impl StoreBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn load<T>(&self, collection: Collection<T>) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.backend.get(collection.name()) else {
            debug!(collection = collection.name(), "collection absent; using default");
            return T::default();
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    collection = collection.name(),
                    %err,
                    "collection payload corrupt; falling back to default"
                );
                T::default()
            }
        }
    }

    pub fn save<T>(&self, collection: Collection<T>, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.put(collection.name(), raw),
            Err(err) => {
                warn!(
                    collection = collection.name(),
                    %err,
                    "could not serialize collection; keeping previous payload"
                );
            }
        }
    }

    /// Drop every collection (teardown/reset support).
    pub fn clear_all(&self) {
        self.backend.clear();
    }
}

impl core::fmt::Debug for Store {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::in_memory::InMemoryBackend;

    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    struct Counter {
        label: String,
        count: u32,
    }

    const COUNTERS: Collection<Vec<Counter>> = Collection::new("counters");

    #[test]
    fn load_of_absent_collection_yields_default() {
        let store = Store::open(InMemoryBackend::new());

        assert_eq!(store.load(COUNTERS), Vec::new());
    }

    #[test]
    fn saved_collection_round_trips() {
        let store = Store::open(InMemoryBackend::new());
        let counters = vec![Counter {
            label: "enrolled".to_string(),
            count: 3,
        }];

        store.save(COUNTERS, &counters);

        assert_eq!(store.load(COUNTERS), counters);
    }

    #[test]
    fn corrupt_payload_falls_back_to_default() {
        let backend = InMemoryBackend::new();
        backend.put("counters", "][ definitely not json".to_string());

        let store = Store::open(backend);

        assert_eq!(store.load(COUNTERS), Vec::new());
    }

    #[test]
    fn clear_all_forgets_saved_collections() {
        let store = Store::open(InMemoryBackend::new());
        store.save(
            COUNTERS,
            &vec![Counter {
                label: "enrolled".to_string(),
                count: 1,
            }],
        );

        store.clear_all();

        assert_eq!(store.load(COUNTERS), Vec::new());
    }
}
