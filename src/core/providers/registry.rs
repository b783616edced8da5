use std::path::{Path, PathBuf};

use tracing::info;

use super::forge::ForgeProvider;
use super::paper::PaperProvider;
use super::provider::VersionProvider;
use super::vanilla::VanillaProvider;
use crate::core::cache::CatalogStore;
use crate::core::downloader::Downloader;
use crate::core::error::{DispenserError, DispenserResult};
use crate::core::software::Software;

/// Dispatcher without Box<dyn>
pub enum Provider {
    Vanilla(VanillaProvider),
    Paper(PaperProvider),
    Forge(ForgeProvider),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            Provider::Vanilla($p) => $body,
            Provider::Paper($p) => $body,
            Provider::Forge($p) => $body,
        }
    };
}

impl Provider {
    pub fn new(software: Software, client: reqwest::Client, java_binary: &Path) -> Self {
        match software {
            Software::Vanilla => Self::Vanilla(VanillaProvider::new(client)),
            Software::Paper => Self::Paper(PaperProvider::new(client)),
            Software::Forge => Self::Forge(ForgeProvider::new(client, java_binary.to_path_buf())),
        }
    }

    pub fn software(&self) -> Software {
        dispatch!(self, p => p.software())
    }

    pub fn download_file_name(&self) -> &'static str {
        dispatch!(self, p => p.download_file_name())
    }

    pub fn artifact_file_name(&self) -> &'static str {
        dispatch!(self, p => p.artifact_file_name())
    }

    pub fn has_version(&self, major: &str, minor: &str) -> bool {
        dispatch!(self, p => p.has_version(major, minor))
    }

    pub fn list_majors(&self) -> Vec<String> {
        dispatch!(self, p => p.list_majors())
    }

    pub fn list_minors(&self, major: &str) -> Vec<String> {
        dispatch!(self, p => p.list_minors(major))
    }

    pub fn minecraft_version(&self, major: &str, minor: &str) -> String {
        dispatch!(self, p => p.minecraft_version(major, minor))
    }

    pub async fn reload(&mut self, store: &CatalogStore, force: bool) -> DispenserResult<()> {
        dispatch!(self, p => p.reload(store, force).await)
    }

    pub async fn resolve_download(&self, major: &str, minor: &str) -> DispenserResult<String> {
        dispatch!(self, p => p.resolve_download(major, minor).await)
    }

    pub async fn install(
        &self,
        downloader: &Downloader,
        directory: &Path,
        major: &str,
        minor: &str,
    ) -> DispenserResult<PathBuf> {
        dispatch!(self, p => p.install(downloader, directory, major, minor).await)
    }

    pub async fn update_major(
        &self,
        downloader: &Downloader,
        directory: &Path,
        target: Option<&str>,
    ) -> DispenserResult<(String, String)> {
        dispatch!(self, p => p.update_major(downloader, directory, target).await)
    }

    pub async fn update_minor(
        &self,
        downloader: &Downloader,
        directory: &Path,
        major: &str,
        target: Option<&str>,
    ) -> DispenserResult<String> {
        dispatch!(self, p => p.update_minor(downloader, directory, major, target).await)
    }
}

/// The fixed set of providers, one per [`Software`].
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    pub fn new(client: reqwest::Client, java_binary: &Path) -> Self {
        let providers = Software::ALL
            .into_iter()
            .map(|software| Provider::new(software, client.clone(), java_binary))
            .collect();

        Self { providers }
    }

    pub fn all(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter()
    }

    pub fn get(&self, software: &str) -> DispenserResult<&Provider> {
        self.get_software(software.parse()?)
    }

    pub fn get_software(&self, software: Software) -> DispenserResult<&Provider> {
        self.providers
            .iter()
            .find(|p| p.software() == software)
            .ok_or_else(|| DispenserError::UnknownSoftware(software.to_string()))
    }

    /// Reload every provider in turn, stopping at the first failure.
    pub async fn reload_all(&mut self, store: &CatalogStore, force: bool) -> DispenserResult<()> {
        info!("Reloading {} version providers", self.providers.len());

        for provider in &mut self.providers {
            provider.reload(store, force).await?;
        }

        Ok(())
    }
}
