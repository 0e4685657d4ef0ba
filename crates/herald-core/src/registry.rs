//! # Instance Registry
//!
//! A composition root for process-wide instances. Whoever initialises a key
//! first wins; every later caller gets the same `Arc`.

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type Entry = Arc<dyn Any + Send + Sync>;

/// Keyed, typed registry of shared instances.
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<(TypeId, String), Entry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing instance under `key`, or the one built by `init`.
    ///
    /// `init` runs at most once per key and type, under the registry's write
    /// lock; it must not call back into the same registry.
    pub fn get_or_init<T, F>(&self, key: &str, init: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get::<T>(key) {
            return existing;
        }

        let mut entries = self.entries.write();
        let slot = (TypeId::of::<T>(), key.to_string());
        if let Some(existing) = entries.get(&slot).and_then(downcast::<T>) {
            return existing;
        }

        debug!(key, kind = std::any::type_name::<T>(), "Registry entry initialised");
        let instance = Arc::new(init());
        entries.insert(slot, instance.clone());
        instance
    }

    /// Instance of type `T` under `key`, if initialised.
    pub fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.entries
            .read()
            .get(&(TypeId::of::<T>(), key.to_string()))
            .and_then(downcast::<T>)
    }

    /// Whether any instance is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().keys().any(|(_, k)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn downcast<T: Any + Send + Sync>(entry: &Entry) -> Option<Arc<T>> {
    entry.clone().downcast::<T>().ok()
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.entries.read().keys().map(|(_, k)| k.clone()).collect();
        f.debug_struct("Registry").field("keys", &keys).finish()
    }
}
