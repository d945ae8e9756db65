use crate::cache::cache::{Cache, KeyType};
use crate::protocol::text::request::{Request, RequestCommand, ValueSlot};
use std::sync::Arc;

/// Applies decoded requests to the shared cache
#[derive(Clone)]
pub struct RequestProcessor {
    cache: Arc<dyn Cache + Send + Sync>,
}

impl RequestProcessor {
    pub fn new(cache: Arc<dyn Cache + Send + Sync>) -> RequestProcessor {
        RequestProcessor { cache }
    }

    /// Executes the request against the cache and leaves the outcome in the
    /// request payload, ready to be rendered. Malformed requests are not
    /// touched.
    pub fn process_request(&self, request: &mut Request) {
        if request.is_malformed() {
            return;
        }

        match request.command() {
            RequestCommand::Set => self.set(request),
            RequestCommand::Get => self.get(request),
            RequestCommand::Unknown => {}
        }
    }

    fn set(&self, request: &Request) {
        for (key, slot) in request.data() {
            if let ValueSlot::Value(value) = slot {
                self.cache.set(key.clone(), value.clone());
            }
        }
    }

    fn get(&self, request: &mut Request) {
        let keys: Vec<KeyType> = request.keys();
        for key in keys {
            let slot = match self.cache.get(&key) {
                Some(value) => ValueSlot::Value(value),
                None => ValueSlot::Missing,
            };
            request.resolve(&key, slot);
        }
        request.remove_missing();
    }
}

#[cfg(test)]
mod handler_tests;
