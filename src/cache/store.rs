//! In-Memory Cache Module
//!
//! Key/value map with per-entry expiry. Backs [`MemoryBackend`](super::MemoryBackend)
//! and is what the background cleanup task sweeps.

use std::collections::HashMap;

use crate::cache::{CacheEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == Memory Cache ==
/// Expiring key/value storage with a fixed capacity.
#[derive(Debug)]
pub struct MemoryCache {
    entries: HashMap<String, CacheEntry>,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl MemoryCache {
    // == Constructor ==
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and its TTL.
    ///
    /// When the cache is full, expired entries are purged first; if it is
    /// still full, the entry closest to expiry is dropped to make room.
    pub fn set(&mut self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> Result<(), CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            self.cleanup_expired();
            if self.entries.len() >= self.max_entries {
                self.evict_soonest_expiring();
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl_seconds));
        Ok(())
    }

    // == Get ==
    /// Returns the value if present and not expired. Expired entries are
    /// dropped on the way out.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    // == Delete ==
    /// Removes an entry. Returns whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    fn evict_soonest_expiring(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
