use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::keys::probe_key;

enum Slot<T> {
    Live(T),
    /// Claimed by [`HandleRegistry::retire`]; the key stays bound until
    /// [`HandleRegistry::remove`] but no longer resolves.
    Retiring,
}

struct Inner<T> {
    entries: HashMap<String, Slot<T>>,
    counter: u64,
}

/// Thread-safe map from generated string keys to stored references.
///
/// A single mutex guards every operation and is held only for the map
/// access itself, never while callers act on the stored objects. The
/// registry forgets mappings; it never tears down what it stores.
pub struct HandleRegistry<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> HandleRegistry<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                counter: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value` under a freshly allocated key and return the key.
    pub fn insert(&self, value: T) -> String {
        let mut inner = self.lock();
        let (key, at) = probe_key(inner.counter, |k| inner.entries.contains_key(k));
        inner.counter = at + 1;
        inner.entries.insert(key.clone(), Slot::Live(value));
        debug!(key = %key, live = inner.entries.len(), "handle inserted");
        key
    }

    /// Claim a live entry for teardown and hand back its reference.
    ///
    /// Returns `None` if the key is unknown or already being retired, so at
    /// most one caller ever receives the reference.
    pub fn retire(&self, key: &str) -> Option<T> {
        let mut inner = self.lock();
        let slot = inner.entries.get_mut(key)?;
        match std::mem::replace(slot, Slot::Retiring) {
            Slot::Live(value) => {
                debug!(key, "handle retiring");
                Some(value)
            }
            Slot::Retiring => None,
        }
    }

    /// Forget the mapping for `key`. Returns whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        let mut inner = self.lock();
        if inner.entries.remove(key).is_some() {
            debug!(key, live = inner.entries.len(), "handle removed");
            true
        } else {
            false
        }
    }

    /// Snapshot of live keys, in allocation order.
    pub fn all_keys(&self) -> Vec<String> {
        let inner = self.lock();
        let mut keys: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Live(_)))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        keys
    }

    /// The key the next [`insert`](Self::insert) would return. Does not
    /// reserve it.
    pub fn next_available_key(&self) -> String {
        let inner = self.lock();
        probe_key(inner.counter, |k| inner.entries.contains_key(k)).0
    }

    /// Number of bound keys, including ones being retired.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every mapping and return the live references for teardown.
    ///
    /// Entries mid-retirement are dropped from the map; their retiring
    /// caller still owns the teardown.
    pub fn drain(&self) -> Vec<(String, T)> {
        let mut inner = self.lock();
        let drained: Vec<(String, T)> = inner
            .entries
            .drain()
            .filter_map(|(key, slot)| match slot {
                Slot::Live(value) => Some((key, value)),
                Slot::Retiring => None,
            })
            .collect();
        debug!(count = drained.len(), "registry drained");
        drained
    }
}

impl<T: Clone> HandleRegistry<T> {
    /// Resolve `key` to its stored reference without mutating anything.
    pub fn lookup(&self, key: &str) -> Option<T> {
        match self.lock().entries.get(key) {
            Some(Slot::Live(value)) => Some(value.clone()),
            _ => None,
        }
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
