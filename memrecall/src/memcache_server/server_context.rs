use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::{
    cache::{cache::Cache, error::Result},
    memcache,
};

/// State shared by every listener of one server instance.
pub struct ServerContext {
    cancellation_token: CancellationToken,
    cache: Arc<dyn Cache + Send + Sync>,
}

impl ServerContext {
    pub fn new(
        cache: Arc<dyn Cache + Send + Sync>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            cancellation_token,
            cache,
        }
    }

    pub fn get_default_server_context(
        store_config: memcache::builder::MemcacheStoreConfig,
    ) -> Result<Self> {
        let cache = memcache::builder::MemcacheStoreBuilder::from_config(store_config)?;
        Ok(Self::new(cache, CancellationToken::new()))
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub fn cache(&self) -> Arc<dyn Cache + Send + Sync> {
        self.cache.clone()
    }
}
