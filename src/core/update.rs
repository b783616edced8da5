// ─── Update ───
// Swap the artifact in an installed directory for another version.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::core::downloader::Downloader;
use crate::core::error::DispenserResult;
use crate::core::providers::ProviderRegistry;
use crate::core::software::Software;

/// What an update ended up installing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub software: Software,
    pub major: String,
    pub minor: String,
}

/// Move `directory` to `target` (or the newest major) and its newest minor.
pub async fn update_major(
    registry: &ProviderRegistry,
    downloader: &Downloader,
    software: &str,
    directory: &Path,
    target: Option<&str>,
) -> DispenserResult<UpdateOutcome> {
    let provider = registry.get(software)?;

    let (major, minor) = provider.update_major(downloader, directory, target).await?;

    info!("Updated {} in {:?} to {} / {}", software, directory, major, minor);
    Ok(UpdateOutcome {
        software: provider.software(),
        major,
        minor,
    })
}

/// Move `directory` to `target` (or the newest minor) within `major`.
pub async fn update_minor(
    registry: &ProviderRegistry,
    downloader: &Downloader,
    software: &str,
    directory: &Path,
    major: &str,
    target: Option<&str>,
) -> DispenserResult<UpdateOutcome> {
    let provider = registry.get(software)?;

    let minor = provider
        .update_minor(downloader, directory, major, target)
        .await?;

    info!("Updated {} in {:?} to {} / {}", software, directory, major, minor);
    Ok(UpdateOutcome {
        software: provider.software(),
        major: major.to_string(),
        minor,
    })
}
