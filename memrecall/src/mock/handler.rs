use crate::cache::cache::Cache;
use crate::cache::lru_cache::LruCache;
use crate::memcache_server::handler::RequestProcessor;
use crate::mock::mock_server::create_lru_server;
use crate::protocol::text::request::Request;
use std::sync::Arc;

pub struct RequestProcessorWithCache {
    pub processor: RequestProcessor,
    pub cache: Arc<LruCache>,
}

impl RequestProcessorWithCache {
    pub fn process_request(&self, request: &mut Request) {
        self.processor.process_request(request)
    }
}

pub fn create_processor(capacity: usize) -> RequestProcessorWithCache {
    let server = create_lru_server(capacity);
    RequestProcessorWithCache {
        processor: server.processor,
        cache: server.cache,
    }
}

pub fn create_get_request(keys: &[&str]) -> Request {
    Request::new(&format!("GET {}", keys.join(" ")))
}

pub fn create_set_request(key: &str, value: &str) -> Request {
    Request::new(&format!(
        "SET {} 0 0 {}\r\n{}",
        key,
        value.len(),
        value
    ))
}

pub fn insert_value(handler: &RequestProcessorWithCache, key: &str, value: &str) {
    handler.cache.set(String::from(key), String::from(value));
}
