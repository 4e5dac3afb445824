//! Raw key-value backend boundary.

use std::sync::Arc;

/// Raw string storage a [`crate::Store`] sits on top of.
///
/// Implementations must never fail the caller: a backend that cannot honor a
/// write logs the refusal and keeps its previous state. Reads return `None`
/// for anything absent or unreadable.
pub trait StoreBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, payload: String);
    /// Drop every key (teardown/reset support).
    fn clear(&self);
}

impl<S> StoreBackend for Arc<S>
where
    S: StoreBackend + ?Sized,
{
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn put(&self, key: &str, payload: String) {
        (**self).put(key, payload)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
