//! Typed collection keys.

use std::marker::PhantomData;

/// A named collection and the type its payload deserializes to.
///
/// Declared as `const` items by the crate that owns the collection, so the
/// key name and the element type can never drift apart at a call site:
///
/// ```
/// use smartlearn_store::Collection;
///
/// const SETTINGS: Collection<Vec<String>> = Collection::new("settings");
/// assert_eq!(SETTINGS.name(), "settings");
/// ```
pub struct Collection<T> {
    name: &'static str,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Collection<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _payload: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

// Manual impls: `Collection<T>` is a key, copyable regardless of `T`.
impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T> core::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Collection").field(&self.name).finish()
    }
}
