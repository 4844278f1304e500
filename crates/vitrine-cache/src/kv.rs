//! Typed wrapper over a [`KvStore`] with automatic serialization.

use crate::{CacheError, KvStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any key-value store.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. A stored value that does not
    /// decode as `T` is an error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let snapshot: Option<Snapshot<Page>> = cache.get("productPageData")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Choice {
        size: String,
        quantity: u32,
    }

    #[test]
    fn test_cache_typed_round_trip() {
        let cache = Cache::new(MemoryStore::new());
        let choice = Choice {
            size: "42".to_string(),
            quantity: 3,
        };

        cache.set("choice", &choice).unwrap();
        assert_eq!(cache.get::<Choice>("choice").unwrap(), Some(choice));
        assert_eq!(
            cache.store().get("choice").unwrap(),
            Some(br#"{"size":"42","quantity":3}"#.to_vec())
        );
    }

    #[test]
    fn test_cache_decode_failure_is_serialize_error() {
        let cache = Cache::new(MemoryStore::new());
        cache.store().set("choice", b"{broken").unwrap();

        let err = cache.get::<Choice>("choice").unwrap_err();
        assert!(matches!(err, CacheError::SerializeError(_)));
    }
}
