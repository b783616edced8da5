// ─── Version Catalog ───
// Canonical major → minor listing shared by every provider.

use serde::{Deserialize, Serialize};

/// Ordered major → minor mapping for one software family.
///
/// Both levels keep the order in which versions were inserted, oldest first,
/// so the "latest" version is always the last element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    majors: Vec<MajorVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorVersion {
    pub id: String,
    #[serde(default)]
    pub minors: Vec<MinorVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorVersion {
    pub id: String,
    /// Provider-specific handle used to resolve the download later on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a major version. Re-inserting an existing major is a no-op.
    pub fn insert_major(&mut self, major: &str) -> &mut MajorVersion {
        let index = match self.majors.iter().position(|m| m.id == major) {
            Some(index) => index,
            None => {
                self.majors.push(MajorVersion {
                    id: major.to_string(),
                    minors: Vec::new(),
                });
                self.majors.len() - 1
            }
        };
        &mut self.majors[index]
    }

    /// Register a minor under `major`, creating the major if needed.
    /// Duplicate minors keep their first position and locator.
    pub fn insert(&mut self, major: &str, minor: &str, locator: Option<String>) {
        let entry = self.insert_major(major);
        if entry.minors.iter().any(|m| m.id == minor) {
            return;
        }
        entry.minors.push(MinorVersion {
            id: minor.to_string(),
            locator,
        });
    }

    pub fn majors(&self) -> Vec<&str> {
        self.majors.iter().map(|m| m.id.as_str()).collect()
    }

    /// Minors of `major`, empty if the major is unknown.
    pub fn minors(&self, major: &str) -> Vec<&str> {
        self.major(major)
            .map(|m| m.minors.iter().map(|minor| minor.id.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn major(&self, major: &str) -> Option<&MajorVersion> {
        self.majors.iter().find(|m| m.id == major)
    }

    pub fn has_major(&self, major: &str) -> bool {
        self.major(major).is_some()
    }

    pub fn contains(&self, major: &str, minor: &str) -> bool {
        self.major(major)
            .map(|m| m.minors.iter().any(|entry| entry.id == minor))
            .unwrap_or(false)
    }

    pub fn locator(&self, major: &str, minor: &str) -> Option<&str> {
        self.major(major)?
            .minors
            .iter()
            .find(|entry| entry.id == minor)?
            .locator
            .as_deref()
    }

    pub fn latest_major(&self) -> Option<&str> {
        self.majors.last().map(|m| m.id.as_str())
    }

    pub fn latest_minor(&self, major: &str) -> Option<&str> {
        self.major(major)?.minors.last().map(|m| m.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }

    /// Total number of minors across all majors.
    pub fn version_count(&self) -> usize {
        self.majors.iter().map(|m| m.minors.len()).sum()
    }
}
