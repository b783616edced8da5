use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::DispenserError;

/// Server software families the dispenser knows how to provide.
///
/// The lowercase name is both the registry key and the cache file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Software {
    Vanilla,
    Paper,
    Forge,
}

impl Software {
    pub const ALL: [Software; 3] = [Software::Vanilla, Software::Paper, Software::Forge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Software::Vanilla => "vanilla",
            Software::Paper => "paper",
            Software::Forge => "forge",
        }
    }
}

impl fmt::Display for Software {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Software {
    type Err = DispenserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Software::ALL
            .into_iter()
            .find(|software| software.as_str() == s)
            .ok_or_else(|| DispenserError::UnknownSoftware(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("vanilla".parse::<Software>().unwrap(), Software::Vanilla);
        assert_eq!("paper".parse::<Software>().unwrap(), Software::Paper);
        assert_eq!("forge".parse::<Software>().unwrap(), Software::Forge);
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "spigot".parse::<Software>().unwrap_err();
        assert!(matches!(err, DispenserError::UnknownSoftware(name) if name == "spigot"));
    }

    #[test]
    fn display_matches_cache_stem() {
        for software in Software::ALL {
            assert_eq!(software.to_string(), software.as_str());
        }
    }
}
