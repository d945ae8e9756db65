use crate::cache::cache::Cache;
use crate::cache::error::Result;
use crate::cache::lru_cache::LruCache;
use std::sync::Arc;

pub struct MemcacheStoreConfig {
    capacity: usize,
}

impl MemcacheStoreConfig {
    pub fn new(capacity: usize) -> MemcacheStoreConfig {
        MemcacheStoreConfig { capacity }
    }
}

pub struct MemcacheStoreBuilder {}

impl MemcacheStoreBuilder {
    pub fn from_config(config: MemcacheStoreConfig) -> Result<Arc<dyn Cache + Send + Sync>> {
        let store: Arc<dyn Cache + Send + Sync> = Arc::new(LruCache::new(config.capacity)?);
        Ok(store)
    }
}
