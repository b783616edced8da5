use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::core::cache::{now_epoch_secs, CatalogStore};
use crate::core::downloader::Downloader;
use crate::core::error::{DispenserError, DispenserResult};
use crate::core::software::Software;
use crate::core::version::Catalog;

/// File name of the runnable server jar left in the target directory.
pub const DEFAULT_ARTIFACT_NAME: &str = "server.jar";

/// One software family's view of its upstream version catalog.
///
/// Implementors supply the upstream-specific pieces (`fetch_data`,
/// `normalize`, `resolve_download`, ...). Cache handling, installation and
/// updates are shared through the default methods.
#[async_trait]
pub trait VersionProvider: Send + Sync {
    /// Raw upstream response, before normalization.
    type Raw: Send;

    fn software(&self) -> Software;

    /// Name the downloaded file is saved under.
    fn download_file_name(&self) -> &'static str {
        DEFAULT_ARTIFACT_NAME
    }

    /// Name of the final artifact once `post_download` has run.
    fn artifact_file_name(&self) -> &'static str {
        DEFAULT_ARTIFACT_NAME
    }

    fn catalog(&self) -> &Catalog;

    fn set_catalog(&mut self, catalog: Catalog);

    /// Fetch the full current catalog from upstream.
    async fn fetch_data(&self) -> DispenserResult<Self::Raw>;

    fn normalize(&self, raw: Self::Raw) -> Catalog;

    /// Download URL for `major`/`minor`. May hit the network.
    async fn resolve_download(&self, major: &str, minor: &str) -> DispenserResult<String>;

    async fn post_download(
        &self,
        _directory: &Path,
        _major: &str,
        _minor: &str,
    ) -> DispenserResult<()> {
        Ok(())
    }

    /// The Minecraft client version a `major`/`minor` pair corresponds to.
    fn minecraft_version(&self, major: &str, minor: &str) -> String;

    fn has_version(&self, major: &str, minor: &str) -> bool {
        self.catalog().contains(major, minor)
    }

    fn list_majors(&self) -> Vec<String> {
        self.catalog()
            .majors()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    fn list_minors(&self, major: &str) -> Vec<String> {
        self.catalog()
            .minors(major)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    fn ensure_version(&self, major: &str, minor: &str) -> DispenserResult<()> {
        if self.has_version(major, minor) {
            Ok(())
        } else {
            Err(DispenserError::invalid_version(
                self.software(),
                major,
                Some(minor),
            ))
        }
    }

    /// Load the catalog from cache, refetching when absent, stale or forced.
    async fn reload(&mut self, store: &CatalogStore, force: bool) -> DispenserResult<()> {
        let software = self.software();
        let cached = store.load(software).await?;
        let now = now_epoch_secs();

        let catalog = match cached {
            Some(record) if !force && !record.is_stale(now, store.lifetime_secs()) => {
                debug!(
                    "Using cached {} catalog from {}",
                    software, record.fetched_at
                );
                record.catalog
            }
            _ => {
                info!("Refreshing {} catalog (force={})", software, force);
                let raw = self.fetch_data().await?;
                let catalog = self.normalize(raw);
                store.store(software, catalog).await?.catalog
            }
        };

        info!(
            "{} catalog ready: {} majors, {} versions",
            software,
            catalog.majors().len(),
            catalog.version_count()
        );
        self.set_catalog(catalog);
        Ok(())
    }

    /// Resolve, download and post-process one version into `directory`.
    ///
    /// Returns the path of the final artifact.
    async fn install(
        &self,
        downloader: &Downloader,
        directory: &Path,
        major: &str,
        minor: &str,
    ) -> DispenserResult<PathBuf> {
        let url = self.resolve_download(major, minor).await?;
        let dest = directory.join(self.download_file_name());

        downloader.download_file(&url, &dest).await?;
        self.post_download(directory, major, minor).await?;

        info!(
            "Dispensed {} {} / {} into {:?}",
            self.software(),
            major,
            minor,
            directory
        );
        Ok(directory.join(self.artifact_file_name()))
    }

    /// `target` if known, otherwise the newest major, paired with its newest minor.
    fn resolve_major_target(&self, target: Option<&str>) -> DispenserResult<(String, String)> {
        let catalog = self.catalog();
        let major = match target {
            Some(major) if catalog.has_major(major) => major,
            Some(major) => return Err(DispenserError::invalid_version(self.software(), major, None)),
            None => catalog
                .latest_major()
                .ok_or_else(|| DispenserError::EmptyCatalog(self.software()))?,
        };
        let minor = catalog
            .latest_minor(major)
            .ok_or_else(|| DispenserError::invalid_version(self.software(), major, None))?;

        Ok((major.to_string(), minor.to_string()))
    }

    /// `target` if known under `major`, otherwise the newest minor of `major`.
    fn resolve_minor_target(&self, major: &str, target: Option<&str>) -> DispenserResult<String> {
        let catalog = self.catalog();
        match target {
            Some(minor) if catalog.contains(major, minor) => Ok(minor.to_string()),
            Some(minor) => Err(DispenserError::invalid_version(
                self.software(),
                major,
                Some(minor),
            )),
            None => catalog
                .latest_minor(major)
                .map(str::to_owned)
                .ok_or_else(|| DispenserError::invalid_version(self.software(), major, None)),
        }
    }

    /// Remove the installed artifact from `directory`, if there is one.
    async fn remove_artifact(&self, directory: &Path) -> DispenserResult<()> {
        let artifact = directory.join(self.artifact_file_name());
        match tokio::fs::remove_file(&artifact).await {
            Ok(()) => {
                info!("Removed previous artifact {:?}", artifact);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DispenserError::Io {
                path: artifact,
                source: e,
            }),
        }
    }

    /// Replace the installed artifact with another major version.
    async fn update_major(
        &self,
        downloader: &Downloader,
        directory: &Path,
        target: Option<&str>,
    ) -> DispenserResult<(String, String)> {
        let (major, minor) = self.resolve_major_target(target)?;

        self.remove_artifact(directory).await?;
        self.install(downloader, directory, &major, &minor).await?;

        Ok((major, minor))
    }

    /// Replace the installed artifact with another minor of `major`.
    async fn update_minor(
        &self,
        downloader: &Downloader,
        directory: &Path,
        major: &str,
        target: Option<&str>,
    ) -> DispenserResult<String> {
        let minor = self.resolve_minor_target(major, target)?;

        self.remove_artifact(directory).await?;
        self.install(downloader, directory, major, &minor).await?;

        Ok(minor)
    }
}
