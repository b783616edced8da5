// ─── Dispense ───
// Resolve and download one version's server artifact into a directory.

use std::path::PathBuf;

use tracing::info;

use crate::core::downloader::Downloader;
use crate::core::error::DispenserResult;
use crate::core::providers::ProviderRegistry;

/// One (software, major, minor, directory) dispense request.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub software: String,
    pub major: String,
    pub minor: String,
    pub directory: PathBuf,
}

impl DownloadRequest {
    pub fn new(
        software: impl Into<String>,
        major: impl Into<String>,
        minor: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            software: software.into(),
            major: major.into(),
            minor: minor.into(),
            directory: directory.into(),
        }
    }
}

/// Download the requested version and run its post-download steps.
///
/// Returns the path of the final artifact.
pub async fn dispense(
    registry: &ProviderRegistry,
    downloader: &Downloader,
    request: &DownloadRequest,
) -> DispenserResult<PathBuf> {
    let provider = registry.get(&request.software)?;

    info!(
        "Dispensing {} {} / {} into {:?}",
        request.software, request.major, request.minor, request.directory
    );

    provider
        .install(downloader, &request.directory, &request.major, &request.minor)
        .await
}
