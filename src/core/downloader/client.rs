use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::error::{DispenserError, DispenserResult};

/// Streams artifacts from a URL onto disk.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` to `dest`, replacing whatever is already there.
    ///
    /// The body is streamed into a sibling `.part` file that is renamed over
    /// `dest` only once it is complete, so a failed transfer leaves `dest`
    /// untouched. Creates parent directories as needed and returns the number
    /// of bytes written.
    pub async fn download_file(&self, url: &str, dest: &Path) -> DispenserResult<u64> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(DispenserError::io(parent))?;
        }

        info!("Downloading {} -> {:?}", url, dest);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispenserError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total_bytes = response.content_length();
        let partial = partial_path(dest);

        let written = match stream_to_file(response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!("Could not remove partial download {:?}: {}", partial, cleanup);
                    }
                }
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, dest)
            .await
            .map_err(DispenserError::io(dest))?;

        debug!(
            "Downloaded {} bytes (expected {:?}) -> {:?}",
            written, total_bytes, dest
        );
        Ok(written)
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "download".into());
    name.push(".part");
    dest.with_file_name(name)
}

async fn stream_to_file(response: reqwest::Response, path: &Path) -> DispenserResult<u64> {
    let mut written = 0u64;

    // The handle is dropped at the end of this function, before the rename.
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(DispenserError::io(path))?;

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(DispenserError::io(path))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(DispenserError::io(path))?;
    Ok(written)
}
