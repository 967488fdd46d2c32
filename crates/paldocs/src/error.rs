//! CLI error types.

use pal_config::ConfigError;
use pal_content::ContentError;
use pal_prefs::PreferenceError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Preference(#[from] PreferenceError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Watch(#[from] notify::Error),

    #[error("{0}")]
    NotFound(String),
}
