use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::provider::{VersionProvider, DEFAULT_ARTIFACT_NAME};
use crate::core::downloader::Downloader;
use crate::core::error::{DispenserError, DispenserResult};
use crate::core::http::fetch_text;
use crate::core::maven::{MavenMetadata, FORGE_MAVEN};
use crate::core::software::Software;
use crate::core::version::Catalog;

const INSTALLER_FILE_NAME: &str = "installer.jar";

/// Forge servers, installed by running the official installer JAR.
///
/// Majors are Minecraft versions, minors the Forge build for that version.
pub struct ForgeProvider {
    client: reqwest::Client,
    java_binary: PathBuf,
    catalog: Catalog,
}

impl ForgeProvider {
    pub fn new(client: reqwest::Client, java_binary: PathBuf) -> Self {
        Self {
            client,
            java_binary,
            catalog: Catalog::new(),
        }
    }

    fn metadata_url() -> String {
        format!("{}/net/minecraftforge/forge/maven-metadata.xml", FORGE_MAVEN)
    }

    fn installer_url(major: &str, minor: &str) -> String {
        let forge_id = format!("{}-{}", major, minor);
        format!(
            "{}/net/minecraftforge/forge/{}/forge-{}-installer.jar",
            FORGE_MAVEN, forge_id, forge_id
        )
    }

    /// Server jars the installer may leave behind, most recent layout first.
    fn installer_outputs(major: &str, minor: &str) -> Vec<String> {
        let forge_id = format!("{}-{}", major, minor);
        vec![
            format!("forge-{}-shim.jar", forge_id),
            format!("forge-{}.jar", forge_id),
            format!("forge-{}-universal.jar", forge_id),
        ]
    }

    async fn run_installer(&self, directory: &Path) -> DispenserResult<()> {
        info!("Running Forge installer in {:?}", directory);

        let status = tokio::process::Command::new(&self.java_binary)
            .arg("-jar")
            .arg(INSTALLER_FILE_NAME)
            .arg("--installServer")
            .current_dir(directory)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                DispenserError::InstallerLaunch(format!("{}: {}", self.java_binary.display(), e))
            })?;

        if status.success() {
            debug!("Forge installer finished");
        } else {
            warn!("Forge installer exited with {:?}", status.code());
        }
        Ok(())
    }
}

/// Deletes the downloaded installer when dropped, whatever the outcome.
pub(crate) struct InstallerArtifact {
    path: PathBuf,
}

impl InstallerArtifact {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for InstallerArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed installer {:?}", self.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove installer {:?}: {}", self.path, e),
        }
    }
}

/// Rename the first existing `candidates` entry in `directory` to `canonical`.
///
/// Consumes the installer guard so the installer is gone once this returns.
pub(crate) async fn finish_install(
    directory: &Path,
    installer: InstallerArtifact,
    candidates: &[String],
    canonical: &str,
) -> DispenserResult<PathBuf> {
    let _installer = installer;

    for candidate in candidates {
        let source = directory.join(candidate);
        if tokio::fs::try_exists(&source)
            .await
            .map_err(DispenserError::io(&source))?
        {
            let target = directory.join(canonical);
            tokio::fs::rename(&source, &target)
                .await
                .map_err(DispenserError::io(&target))?;
            info!("Installed {} as {:?}", candidate, target);
            return Ok(target);
        }
    }

    Err(DispenserError::MissingInstallerOutput {
        directory: directory.to_path_buf(),
        candidates: candidates.to_vec(),
    })
}

#[async_trait]
impl VersionProvider for ForgeProvider {
    type Raw = MavenMetadata;

    fn software(&self) -> Software {
        Software::Forge
    }

    fn download_file_name(&self) -> &'static str {
        INSTALLER_FILE_NAME
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    async fn fetch_data(&self) -> DispenserResult<MavenMetadata> {
        info!("Fetching Forge maven metadata...");
        let xml = fetch_text(&self.client, &Self::metadata_url()).await?;
        MavenMetadata::parse(&xml)
    }

    fn normalize(&self, raw: MavenMetadata) -> Catalog {
        let mut catalog = Catalog::new();
        for version in raw.versions() {
            match version.split_once('-') {
                Some((minecraft, build)) => catalog.insert(minecraft, build, None),
                None => debug!("Skipping unversioned Forge entry {}", version),
            }
        }
        catalog
    }

    async fn resolve_download(&self, major: &str, minor: &str) -> DispenserResult<String> {
        self.ensure_version(major, minor)?;
        Ok(Self::installer_url(major, minor))
    }

    async fn post_download(&self, directory: &Path, major: &str, minor: &str) -> DispenserResult<()> {
        let installer = InstallerArtifact::new(directory.join(INSTALLER_FILE_NAME));

        self.run_installer(directory).await?;

        finish_install(
            directory,
            installer,
            &Self::installer_outputs(major, minor),
            DEFAULT_ARTIFACT_NAME,
        )
        .await?;
        Ok(())
    }

    fn minecraft_version(&self, major: &str, _minor: &str) -> String {
        major.to_string()
    }

    async fn update_major(
        &self,
        _downloader: &Downloader,
        _directory: &Path,
        _target: Option<&str>,
    ) -> DispenserResult<(String, String)> {
        Err(DispenserError::Unsupported {
            software: Software::Forge,
            operation: "update_major",
        })
    }

    async fn update_minor(
        &self,
        _downloader: &Downloader,
        _directory: &Path,
        _major: &str,
        _target: Option<&str>,
    ) -> DispenserResult<String> {
        Err(DispenserError::Unsupported {
            software: Software::Forge,
            operation: "update_minor",
        })
    }
}
