use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::cache::{CatalogStore, DEFAULT_CACHE_LIFETIME_SECS};
use crate::core::downloader::Downloader;
use crate::core::error::{DispenserError, DispenserResult};
use crate::core::http::{build_http_client, APP_USER_AGENT};
use crate::core::providers::ProviderRegistry;

const APP_DIR_NAME: &str = "dispenser";
pub const SETTINGS_FILE: &str = "dispenser_settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispenserSettings {
    /// Directory holding one catalog cache file per software.
    pub cache_dir: PathBuf,
    pub cache_lifetime_secs: i64,
    /// Java executable used to run installers.
    pub java_binary: PathBuf,
    pub user_agent: String,
}

impl Default for DispenserSettings {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            cache_lifetime_secs: DEFAULT_CACHE_LIFETIME_SECS,
            java_binary: PathBuf::from("java"),
            user_agent: APP_USER_AGENT.to_string(),
        }
    }
}

impl DispenserSettings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> DispenserResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(DispenserError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> DispenserResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(DispenserError::io(path))
    }
}

/// Everything the dispense and update operations need, built once at start.
pub struct DispenserState {
    pub settings: DispenserSettings,
    pub http_client: Client,
    pub downloader: Downloader,
    pub store: CatalogStore,
    pub registry: ProviderRegistry,
}

impl DispenserState {
    /// Build the shared client and registry, then load every catalog.
    pub async fn initialize(settings: DispenserSettings, force: bool) -> DispenserResult<Self> {
        let http_client = build_http_client(&settings.user_agent)?;
        let downloader = Downloader::new(http_client.clone());
        let store = CatalogStore::new(settings.cache_dir.clone())
            .with_lifetime(settings.cache_lifetime_secs);
        let mut registry = ProviderRegistry::new(http_client.clone(), &settings.java_binary);

        if settings.cache_lifetime_secs <= 0 {
            warn!(
                "Cache lifetime is {}s, every start will refetch",
                settings.cache_lifetime_secs
            );
        }

        registry.reload_all(&store, force).await?;

        Ok(Self {
            settings,
            http_client,
            downloader,
            store,
            registry,
        })
    }
}

fn default_base_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_cache_dir() -> PathBuf {
    default_base_dir().join(APP_DIR_NAME)
}
