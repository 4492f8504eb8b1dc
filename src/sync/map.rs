use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

/// A map that can be shared between threads. Clones share the same storage.
///
/// Values are returned as clones, so no lock is held once a method returns.
/// A poisoned lock reads as empty and ignores writes.
#[derive(Debug)]
pub struct SyncMap<K, V> {
    storage: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Clone for SyncMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<K, V> Default for SyncMap<K, V> {
    fn default() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.storage.read().ok()?.get(key).cloned()
    }

    /// Insert or replace the value for `key`
    pub fn store(&self, key: K, value: V) {
        if let Ok(mut storage) = self.storage.write() {
            storage.insert(key, value);
        }
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.storage.write().ok()?.remove(key)
    }

    pub fn len(&self) -> usize {
        self.storage.read().map(|storage| storage.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `f` for every entry until it returns false.
    ///
    /// `f` runs on a snapshot taken up front, so it may freely read or modify
    /// the map. Iteration order is unspecified.
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let snapshot: Vec<(K, V)> = match self.storage.read() {
            Ok(storage) => storage
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            Err(_) => return,
        };

        for (k, v) in &snapshot {
            if !f(k, v) {
                break;
            }
        }
    }
}
