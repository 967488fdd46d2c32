//! CLI command implementations.

pub(crate) mod headings;
pub(crate) mod nav;
pub(crate) mod page;
pub(crate) mod prefs;

use std::path::PathBuf;

use clap::Args;
use pal_config::{CliSettings, Config};
use pal_content::{Collection, FsSource};
use pal_nav::NavIndexer;

use crate::error::CliError;

pub(crate) use headings::HeadingsArgs;
pub(crate) use nav::NavArgs;
pub(crate) use page::PageArgs;
pub(crate) use prefs::PrefsCommand;

/// Options shared by every command.
#[derive(Args, Debug, Default)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover paldocs.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long, global = true, env = "PALDOCS_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl ProjectArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..Default::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Scan the configured content into a collection.
pub(crate) fn load_collection(config: &Config) -> Result<Collection, CliError> {
    let docs = &config.docs_resolved;
    let source = FsSource::with_pattern(&docs.source_dir, &docs.pattern)?;
    Ok(Collection::load(&source)?)
}

/// Navigation indexer with the configured group order.
pub(crate) fn indexer(config: &Config) -> NavIndexer {
    NavIndexer::new().with_group_orders(config.group_orders())
}
