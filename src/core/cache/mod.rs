pub mod store;

pub use store::{now_epoch_secs, CacheRecord, CatalogStore, DEFAULT_CACHE_LIFETIME_SECS};
