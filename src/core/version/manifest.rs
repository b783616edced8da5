// ─── Version Manifest ───
// Mojang version manifest v2: the flat list behind the vanilla catalog.

use serde::Deserialize;
use tracing::info;

use crate::core::error::DispenserResult;
use crate::core::http::fetch_json;

pub const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Top-level Mojang version manifest.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub versions: Vec<VersionEntry>,
}

/// A single entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: String,
    pub url: String,
}

impl VersionManifest {
    /// Fetch the version manifest from Mojang using a shared HTTP client.
    pub async fn fetch(client: &reqwest::Client) -> DispenserResult<Self> {
        info!("Fetching Minecraft version manifest...");

        let manifest: VersionManifest = fetch_json(client, VERSION_MANIFEST_URL).await?;

        info!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_manifest_entry() {
        let json = r#"{
            "id": "1.20.4",
            "type": "release",
            "url": "https://example.com/1.20.4.json",
            "time": "2023-12-07T08:00:00+00:00",
            "sha1": "abc123"
        }"#;
        let entry: VersionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "1.20.4");
        assert_eq!(entry.version_type, "release");
        assert_eq!(entry.url, "https://example.com/1.20.4.json");
    }
}
