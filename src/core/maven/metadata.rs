use serde::Deserialize;

use crate::core::error::DispenserResult;

/// `maven-metadata.xml` as published next to every Maven artifact.
#[derive(Debug, Deserialize)]
pub struct MavenMetadata {
    pub versioning: MavenVersioning,
}

#[derive(Debug, Deserialize)]
pub struct MavenVersioning {
    pub versions: MavenVersions,
}

#[derive(Debug, Deserialize)]
pub struct MavenVersions {
    #[serde(rename = "version", default)]
    pub version: Vec<String>,
}

impl MavenMetadata {
    pub fn parse(xml: &str) -> DispenserResult<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Published versions, in document order.
    pub fn versions(&self) -> &[String] {
        &self.versioning.versions.version
    }
}
