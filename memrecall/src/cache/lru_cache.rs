use super::cache::{Cache, KeyType, ValueType};
use super::error::{CacheError, Result};
use super::recency_list::{NodeHandle, RecencyList};
use parking_lot::Mutex;
use std::collections::HashMap;

struct LruState {
    index: HashMap<KeyType, NodeHandle>,
    recency: RecencyList<(KeyType, ValueType)>,
}

impl LruState {
    fn evict(&mut self) {
        if let Some(handle) = self.recency.item_to_evict() {
            let (key, _value) = self.recency.remove(handle);
            trace!("Evicting key: {}", key);
            self.index.remove(&key);
        }
    }
}

/// Fixed capacity cache with least recently used eviction.
///
/// The key index and the recency list are only touched together while holding
/// the instance lock, so concurrent callers always observe them in sync.
pub struct LruCache {
    state: Mutex<LruState>,
    capacity: usize,
}

impl LruCache {
    pub fn new(capacity: usize) -> Result<LruCache> {
        if capacity == 0 {
            return Err(CacheError::CapacityOutOfRange);
        }
        debug!("Creating lru cache, capacity: {}", capacity);
        Ok(LruCache {
            state: Mutex::new(LruState {
                index: HashMap::with_capacity(capacity),
                recency: RecencyList::with_capacity(capacity),
            }),
            capacity,
        })
    }

    /// Key that would be evicted by the next insert of a new key, if the
    /// cache were full.
    pub fn peek_lru_key(&self) -> Option<KeyType> {
        let state = self.state.lock();
        state
            .recency
            .item_to_evict()
            .map(|handle| state.recency.get(handle).0.clone())
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<KeyType> {
        let state = self.state.lock();
        state.recency.iter().map(|(key, _)| key.clone()).collect()
    }
}

impl Cache for LruCache {
    fn get(&self, key: &str) -> Option<ValueType> {
        let mut state = self.state.lock();
        let handle = *state.index.get(key)?;
        state.recency.promote(handle);
        Some(state.recency.get(handle).1.clone())
    }

    fn set(&self, key: KeyType, value: ValueType) {
        let mut state = self.state.lock();
        let existing = state.index.get(&key).copied();
        if let Some(handle) = existing {
            state.recency.get_mut(handle).1 = value;
            state.recency.promote(handle);
            return;
        }

        if state.index.len() >= self.capacity {
            state.evict();
        }
        let handle = state.recency.add_first((key.clone(), value));
        state.index.insert(key, handle);
    }

    fn len(&self) -> usize {
        self.state.lock().index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
