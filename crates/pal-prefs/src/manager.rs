//! Package manager choice.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PreferenceError;

/// JavaScript package manager shown in install commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    #[default]
    Pnpm,
}

impl PackageManager {
    /// All managers in tab order.
    pub const ALL: [Self; 3] = [Self::Npm, Self::Yarn, Self::Pnpm];

    /// Lowercase name, also the stored value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = PreferenceError;

    /// Parse a lowercase name; matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(PreferenceError::UnknownManager(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_pnpm() {
        assert_eq!(PackageManager::default(), PackageManager::Pnpm);
    }

    #[test]
    fn test_parse_names() {
        for manager in PackageManager::ALL {
            assert_eq!(manager.as_str().parse::<PackageManager>().unwrap(), manager);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("NPM".parse::<PackageManager>().is_err());
        assert!(" pnpm".parse::<PackageManager>().is_err());
        assert!("bun".parse::<PackageManager>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&PackageManager::Yarn).unwrap(), "\"yarn\"");
    }
}
