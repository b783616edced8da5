// ─── Version File ───
// The per-version Mojang JSON, reduced to the server download.

use serde::Deserialize;

use crate::core::error::{DispenserError, DispenserResult};

#[derive(Debug, Deserialize)]
pub struct VersionJson {
    pub id: Option<String>,
    pub downloads: Option<VersionDownloads>,
}

#[derive(Debug, Deserialize)]
pub struct VersionDownloads {
    pub server: Option<DownloadArtifact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadArtifact {
    pub url: String,
}

impl VersionJson {
    /// URL of the dedicated server jar.
    ///
    /// Very old versions ship no server download at all.
    pub fn server_url(&self) -> DispenserResult<&str> {
        self.downloads
            .as_ref()
            .and_then(|d| d.server.as_ref())
            .map(|server| server.url.as_str())
            .ok_or_else(|| {
                DispenserError::UpstreamApi(format!(
                    "version {} has no server download",
                    self.id.as_deref().unwrap_or("<unknown>")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_server_download() {
        let json = r#"{
            "id": "1.20.4",
            "downloads": {
                "client": { "sha1": "a", "size": 1, "url": "https://example.com/client.jar" },
                "server": { "sha1": "b", "size": 2, "url": "https://example.com/server.jar" }
            }
        }"#;
        let version: VersionJson = serde_json::from_str(json).unwrap();
        assert_eq!(version.server_url().unwrap(), "https://example.com/server.jar");
    }

    #[test]
    fn missing_server_download_is_upstream_error() {
        let json = r#"{
            "id": "a1.0.4",
            "downloads": { "client": { "sha1": "a", "size": 1, "url": "https://example.com/client.jar" } }
        }"#;
        let version: VersionJson = serde_json::from_str(json).unwrap();
        assert!(matches!(
            version.server_url(),
            Err(DispenserError::UpstreamApi(message)) if message.contains("a1.0.4")
        ));
    }
}
