//! Preference error types.

use std::path::PathBuf;

/// Preference errors.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// Preference file could not be read or written.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Preference file is not a JSON object of strings.
    #[error("Invalid preference file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Backend refused access.
    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),
    /// Value is not a known package manager.
    #[error("Unknown package manager `{0}` (expected npm, yarn or pnpm)")]
    UnknownManager(String),
}
