use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::provider::VersionProvider;
use crate::core::error::DispenserResult;
use crate::core::http::fetch_json;
use crate::core::software::Software;
use crate::core::version::Catalog;

const PAPER_API_BASE: &str = "https://api.papermc.io/v2/projects/paper";

#[derive(Debug, Deserialize)]
pub struct PaperProject {
    pub versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaperVersion {
    pub version: String,
    #[serde(default)]
    pub builds: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PaperBuild {
    pub downloads: PaperDownloads,
}

#[derive(Debug, Deserialize)]
pub struct PaperDownloads {
    pub application: PaperDownload,
}

#[derive(Debug, Deserialize)]
pub struct PaperDownload {
    pub name: String,
}

/// Paper servers from the PaperMC v2 API: Minecraft version → build number.
pub struct PaperProvider {
    client: reqwest::Client,
    catalog: Catalog,
}

impl PaperProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            catalog: Catalog::new(),
        }
    }

    fn download_url(version: &str, build: &str, file_name: &str) -> String {
        format!(
            "{}/versions/{}/builds/{}/downloads/{}",
            PAPER_API_BASE, version, build, file_name
        )
    }
}

#[async_trait]
impl VersionProvider for PaperProvider {
    type Raw = Vec<PaperVersion>;

    fn software(&self) -> Software {
        Software::Paper
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    async fn fetch_data(&self) -> DispenserResult<Vec<PaperVersion>> {
        let project: PaperProject = fetch_json(&self.client, PAPER_API_BASE).await?;
        info!(
            "Fetching Paper builds for {} versions...",
            project.versions.len()
        );

        let mut versions = Vec::with_capacity(project.versions.len());
        for version in &project.versions {
            let url = format!("{}/versions/{}", PAPER_API_BASE, version);
            versions.push(fetch_json::<PaperVersion>(&self.client, &url).await?);
        }

        Ok(versions)
    }

    fn normalize(&self, raw: Vec<PaperVersion>) -> Catalog {
        let mut catalog = Catalog::new();
        for version in raw {
            catalog.insert_major(&version.version);
            for build in version.builds {
                catalog.insert(&version.version, &build.to_string(), None);
            }
        }
        catalog
    }

    async fn resolve_download(&self, major: &str, minor: &str) -> DispenserResult<String> {
        self.ensure_version(major, minor)?;

        let url = format!("{}/versions/{}/builds/{}", PAPER_API_BASE, major, minor);
        let build: PaperBuild = fetch_json(&self.client, &url).await?;

        Ok(Self::download_url(
            major,
            minor,
            &build.downloads.application.name,
        ))
    }

    fn minecraft_version(&self, major: &str, _minor: &str) -> String {
        major.to_string()
    }
}
