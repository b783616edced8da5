// ─── Catalog Store ───
// One JSON file per software family, holding the catalog and its fetch time.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{DispenserError, DispenserResult};
use crate::core::software::Software;
use crate::core::version::Catalog;

/// Seconds a cached catalog is trusted before it must be refetched.
pub const DEFAULT_CACHE_LIFETIME_SECS: i64 = 7200;

/// Placeholder written when a cache file is created for the first time.
const EMPTY_CACHE: &str = "{}";

/// A catalog together with the moment it was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Epoch seconds of the last successful fetch.
    pub fetched_at: i64,
    pub catalog: Catalog,
}

impl CacheRecord {
    pub fn is_stale(&self, now: i64, lifetime_secs: i64) -> bool {
        self.fetched_at + lifetime_secs < now
    }
}

pub fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}

/// Reads and writes the per-software cache files under a root directory.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: PathBuf,
    lifetime_secs: i64,
}

impl CatalogStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            lifetime_secs: DEFAULT_CACHE_LIFETIME_SECS,
        }
    }

    pub fn with_lifetime(mut self, lifetime_secs: i64) -> Self {
        self.lifetime_secs = lifetime_secs;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    pub fn path_for(&self, software: Software) -> PathBuf {
        self.root.join(format!("{}.json", software.as_str()))
    }

    /// Load the cached record for `software`.
    ///
    /// A missing file is created as `{}` first and reads as `None`.
    /// Anything else that does not decode is a fatal `CacheCorrupt`.
    pub async fn load(&self, software: Software) -> DispenserResult<Option<CacheRecord>> {
        let path = self.path_for(software);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(DispenserError::io(&self.root))?;

        if !tokio::fs::try_exists(&path)
            .await
            .map_err(DispenserError::io(&path))?
        {
            debug!("Creating empty cache file {:?}", path);
            tokio::fs::write(&path, EMPTY_CACHE)
                .await
                .map_err(DispenserError::io(&path))?;
        }

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(DispenserError::io(&path))?;

        parse_record(&raw).map_err(|source| DispenserError::CacheCorrupt { path, source })
    }

    /// Persist `catalog` for `software` with a fresh timestamp.
    ///
    /// Writes a sibling temp file and renames it over the cache file.
    pub async fn store(&self, software: Software, catalog: Catalog) -> DispenserResult<CacheRecord> {
        let path = self.path_for(software);
        let tmp_path = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(DispenserError::io(&self.root))?;

        let record = CacheRecord {
            fetched_at: now_epoch_secs(),
            catalog,
        };
        let json = serde_json::to_string(&record)?;

        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(DispenserError::io(&tmp_path))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(DispenserError::io(&path))?;

        info!(
            "Cached {} {} versions at {:?}",
            record.catalog.version_count(),
            software,
            path
        );
        Ok(record)
    }
}

fn parse_record(raw: &str) -> Result<Option<CacheRecord>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    if value.as_object().is_some_and(|obj| obj.is_empty()) {
        return Ok(None);
    }

    serde_json::from_value(value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert("1.19", "45", None);
        catalog.insert("1.19", "46", None);
        catalog.insert("1.20", "1", None);
        catalog
    }

    #[tokio::test]
    async fn missing_file_is_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("cache"));

        let record = store.load(Software::Paper).await.unwrap();

        assert!(record.is_none());
        let raw = std::fs::read_to_string(store.path_for(Software::Paper)).unwrap();
        assert_eq!(raw, "{}");
    }

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().to_path_buf());

        let before = now_epoch_secs();
        store.store(Software::Forge, sample_catalog()).await.unwrap();

        let record = store.load(Software::Forge).await.unwrap().unwrap();
        assert_eq!(record.catalog, sample_catalog());
        assert!(record.fetched_at >= before);
        assert!(record.fetched_at <= now_epoch_secs());
        assert!(!store.path_for(Software::Forge).with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().to_path_buf());
        std::fs::write(store.path_for(Software::Vanilla), "{\"fetched_at\": ").unwrap();

        let err = store.load(Software::Vanilla).await.unwrap_err();
        assert!(matches!(err, DispenserError::CacheCorrupt { .. }));
    }

    #[tokio::test]
    async fn unexpected_shape_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().to_path_buf());
        std::fs::write(
            store.path_for(Software::Paper),
            r#"{"1.19": ["45", "46"], "$time": 1700000000}"#,
        )
        .unwrap();

        let err = store.load(Software::Paper).await.unwrap_err();
        assert!(matches!(err, DispenserError::CacheCorrupt { .. }));
    }

    #[test]
    fn staleness_boundaries() {
        let now = 1_700_000_000;
        let lifetime = DEFAULT_CACHE_LIFETIME_SECS;

        let old = CacheRecord {
            fetched_at: now - lifetime - 1,
            catalog: Catalog::new(),
        };
        let fresh = CacheRecord {
            fetched_at: now,
            catalog: Catalog::new(),
        };
        let edge = CacheRecord {
            fetched_at: now - lifetime,
            catalog: Catalog::new(),
        };

        assert!(old.is_stale(now, lifetime));
        assert!(!fresh.is_stale(now, lifetime));
        assert!(!edge.is_stale(now, lifetime));
    }
}
