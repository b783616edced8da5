pub mod catalog;
pub mod manifest;
pub mod version_file;

pub use catalog::{Catalog, MajorVersion, MinorVersion};
pub use manifest::{VersionEntry, VersionManifest};
pub use version_file::VersionJson;
