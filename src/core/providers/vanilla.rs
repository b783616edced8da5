use async_trait::async_trait;
use tracing::info;

use super::provider::VersionProvider;
use crate::core::error::{DispenserError, DispenserResult};
use crate::core::http::fetch_json;
use crate::core::software::Software;
use crate::core::version::{Catalog, VersionJson, VersionManifest};

/// Vanilla servers straight from the Mojang manifest.
///
/// Majors are release channels (`release`, `snapshot`, `old_beta`,
/// `old_alpha`); minors are version ids whose locator is the per-version
/// JSON that carries the server download.
pub struct VanillaProvider {
    client: reqwest::Client,
    catalog: Catalog,
}

impl VanillaProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            catalog: Catalog::new(),
        }
    }
}

#[async_trait]
impl VersionProvider for VanillaProvider {
    type Raw = VersionManifest;

    fn software(&self) -> Software {
        Software::Vanilla
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    async fn fetch_data(&self) -> DispenserResult<VersionManifest> {
        VersionManifest::fetch(&self.client).await
    }

    fn normalize(&self, raw: VersionManifest) -> Catalog {
        let mut catalog = Catalog::new();
        // The manifest lists newest first.
        for entry in raw.versions.into_iter().rev() {
            catalog.insert(&entry.version_type, &entry.id, Some(entry.url));
        }
        catalog
    }

    async fn resolve_download(&self, major: &str, minor: &str) -> DispenserResult<String> {
        let locator = self.catalog.locator(major, minor).ok_or_else(|| {
            DispenserError::invalid_version(Software::Vanilla, major, Some(minor))
        })?;

        info!("Resolving vanilla {} server download", minor);
        let version: VersionJson = fetch_json(&self.client, locator).await?;
        version.server_url().map(str::to_owned)
    }

    fn minecraft_version(&self, _major: &str, minor: &str) -> String {
        minor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> VersionManifest {
        serde_json::from_str(
            r#"{
                "latest": { "release": "1.20.4", "snapshot": "24w03a" },
                "versions": [
                    { "id": "24w03a", "type": "snapshot", "url": "https://example.com/24w03a.json" },
                    { "id": "1.20.4", "type": "release", "url": "https://example.com/1.20.4.json" },
                    { "id": "1.20.3", "type": "release", "url": "https://example.com/1.20.3.json" },
                    { "id": "b1.7.3", "type": "old_beta", "url": "https://example.com/b1.7.3.json" }
                ]
            }"#,
        )
        .unwrap()
    }

    fn provider() -> VanillaProvider {
        VanillaProvider::new(reqwest::Client::new())
    }

    #[test]
    fn normalize_groups_by_type_oldest_first() {
        let provider = provider();
        let catalog = provider.normalize(manifest());

        assert_eq!(catalog.majors(), vec!["old_beta", "release", "snapshot"]);
        assert_eq!(catalog.minors("release"), vec!["1.20.3", "1.20.4"]);
        assert_eq!(catalog.latest_minor("release"), Some("1.20.4"));
        assert_eq!(
            catalog.locator("release", "1.20.4"),
            Some("https://example.com/1.20.4.json")
        );
    }

    #[test]
    fn client_version_is_the_minor() {
        assert_eq!(provider().minecraft_version("release", "1.20.4"), "1.20.4");
    }

    #[tokio::test]
    async fn unknown_version_has_no_download() {
        let mut provider = provider();
        let catalog = provider.normalize(manifest());
        provider.set_catalog(catalog);

        let err = provider.resolve_download("release", "1.99").await.unwrap_err();
        assert!(matches!(err, DispenserError::InvalidVersion { .. }));
    }
}
