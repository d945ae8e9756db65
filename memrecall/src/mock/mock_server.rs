use crate::cache::lru_cache::LruCache;
use crate::memcache_server::handler::RequestProcessor;
use std::sync::Arc;

pub struct MockServer {
    pub cache: Arc<LruCache>,
    pub processor: RequestProcessor,
}

impl MockServer {
    pub fn new(cache: Arc<LruCache>) -> Self {
        MockServer {
            processor: RequestProcessor::new(cache.clone()),
            cache,
        }
    }
}

pub fn create_lru_cache(capacity: usize) -> Arc<LruCache> {
    match LruCache::new(capacity) {
        Ok(cache) => Arc::new(cache),
        Err(err) => panic!("Cannot create mock cache: {}", err),
    }
}

pub fn create_lru_server(capacity: usize) -> MockServer {
    MockServer::new(create_lru_cache(capacity))
}
