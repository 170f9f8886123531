//! Keyed cache entries

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A map of lazily loaded entries with per-key eviction
#[derive(Debug, Clone)]
pub struct CacheMap<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for CacheMap<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> CacheMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Drop one entry
    pub fn evict<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.remove(key)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Return the entry for `key`, loading it on a miss or when `reload` is set
    ///
    /// A reload evicts before loading, so a failed reload leaves no entry.
    pub fn get_or_load<E, F>(&mut self, key: K, reload: bool, load: F) -> Result<&V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if reload {
            self.entries.remove(&key);
        }

        if !self.entries.contains_key(&key) {
            let value = load(&key)?;
            return Ok(&*self.entries.entry(key).or_insert(value));
        }

        Ok(&self.entries[&key])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_loads_each_key_once() {
        let calls = Cell::new(0);
        let mut cache: CacheMap<String, usize> = CacheMap::new();

        for key in ["a", "b", "a", "b", "a"] {
            cache
                .get_or_load(key.to_string(), false, |k| {
                    calls.set(calls.get() + 1);
                    Ok::<_, ()>(k.len())
                })
                .unwrap();
        }

        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reload_refetches_entry() {
        let mut cache: CacheMap<String, i32> = CacheMap::new();
        cache.get_or_load("a".into(), false, |_| Ok::<_, ()>(1)).unwrap();
        let value = cache.get_or_load("a".into(), true, |_| Ok::<_, ()>(2)).unwrap();
        assert_eq!(*value, 2);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let mut cache: CacheMap<String, i32> = CacheMap::new();
        assert!(cache.get_or_load("a".into(), false, |_| Err("boom")).is_err());
        assert!(!cache.contains("a"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_reload_leaves_entry_absent() {
        let mut cache: CacheMap<String, i32> = CacheMap::new();
        cache.get_or_load("a".into(), false, |_| Ok::<_, &str>(1)).unwrap();
        cache.get_or_load("b".into(), false, |_| Ok::<_, &str>(2)).unwrap();

        assert!(cache.get_or_load("a".into(), true, |_| Err("boom")).is_err());
        assert!(!cache.contains("a"));
        assert_eq!(cache.get("b"), Some(&2));
    }

    #[test]
    fn test_evict_and_clear() {
        let mut cache: CacheMap<String, i32> = CacheMap::new();
        cache.get_or_load("a".into(), false, |_| Ok::<_, ()>(1)).unwrap();
        cache.get_or_load("b".into(), false, |_| Ok::<_, ()>(2)).unwrap();

        assert_eq!(cache.evict("a"), Some(1));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
