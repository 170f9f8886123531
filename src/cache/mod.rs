//! In-memory caches for data fetched from a TCAT instance
//!
//! Both caches share one contract: a hit returns the stored value, a miss
//! (or an explicit reload, which evicts first) runs the loader and stores its
//! result only when it succeeds.

mod map;

pub use map::CacheMap;

/// A single lazily loaded value
#[derive(Debug, Clone)]
pub struct Cached<T> {
    value: Option<T>,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Cached<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value, if loaded
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    /// Drop the cached value
    pub fn evict(&mut self) -> Option<T> {
        self.value.take()
    }

    /// Return the cached value, loading it on a miss or when `reload` is set
    pub fn get_or_load<E, F>(&mut self, reload: bool, load: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = match self.value.take() {
            Some(value) if !reload => value,
            _ => load()?,
        };
        Ok(&*self.value.insert(value))
    }
}
