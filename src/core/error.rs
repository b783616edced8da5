use std::path::PathBuf;
use thiserror::Error;

use crate::core::software::Software;

/// Central error type for the dispenser.
/// Every module returns `Result<T, DispenserError>`.
#[derive(Debug, Error)]
pub enum DispenserError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Upstream API error: {0}")]
    UpstreamApi(String),

    // ── Payloads ────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    // ── Cache ───────────────────────────────────────────
    #[error("Corrupt version cache at {path:?}: {source}")]
    CacheCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ── Catalog ─────────────────────────────────────────
    #[error("Unknown software: {0}")]
    UnknownSoftware(String),

    #[error("No {0} versions are known: the catalog is empty")]
    EmptyCatalog(Software),

    #[error("Invalid version for {software}: {}", describe_version(.major, .minor))]
    InvalidVersion {
        software: Software,
        major: String,
        minor: Option<String>,
    },

    // ── Installer ───────────────────────────────────────
    #[error("Installer produced none of {candidates:?} in {directory:?}")]
    MissingInstallerOutput {
        directory: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Installer could not be started: {0}")]
    InstallerLaunch(String),

    // ── Capability ──────────────────────────────────────
    #[error("{software} does not support {operation}")]
    Unsupported {
        software: Software,
        operation: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type DispenserResult<T> = Result<T, DispenserError>;

impl From<std::io::Error> for DispenserError {
    fn from(source: std::io::Error) -> Self {
        DispenserError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

fn describe_version(major: &str, minor: &Option<String>) -> String {
    match minor {
        Some(minor) => format!("{major} / {minor}"),
        None => major.to_string(),
    }
}

impl DispenserError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| DispenserError::Io { path, source }
    }

    pub(crate) fn invalid_version(software: Software, major: &str, minor: Option<&str>) -> Self {
        DispenserError::InvalidVersion {
            software,
            major: major.to_string(),
            minor: minor.map(str::to_string),
        }
    }
}
