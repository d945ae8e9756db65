#[allow(clippy::module_inception)]
pub mod cache;
pub mod error;
pub mod lru_cache;
pub mod recency_list;
