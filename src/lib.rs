pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::cache::{CacheRecord, CatalogStore};
pub use crate::core::dispense::{dispense, DownloadRequest};
pub use crate::core::downloader::Downloader;
pub use crate::core::error::{DispenserError, DispenserResult};
pub use crate::core::providers::{Provider, ProviderRegistry, VersionProvider};
pub use crate::core::software::Software;
pub use crate::core::state::{DispenserSettings, DispenserState};
pub use crate::core::update::{update_major, update_minor, UpdateOutcome};
pub use crate::core::version::Catalog;

/// Install the structured logging subscriber.
///
/// `RUST_LOG` overrides the default `info,dispenser=debug` filter. Calling
/// this more than once is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dispenser=debug")),
        )
        .try_init();
}
