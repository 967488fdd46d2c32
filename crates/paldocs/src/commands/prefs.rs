//! `paldocs prefs` command implementations.

use std::sync::Arc;

use clap::{Args, Subcommand, ValueEnum};
use pal_config::Config;
use pal_prefs::{FileBackend, PackageCommands, PackageManager, PreferenceStore};

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Package-manager preference commands.
#[derive(Subcommand)]
pub(crate) enum PrefsCommand {
    /// Show the selected package manager.
    Get(GetArgs),
    /// Select a package manager.
    Set(SetArgs),
    /// Print an install command for the selected package manager.
    Install(InstallArgs),
}

/// Arguments for `prefs get`.
#[derive(Args)]
pub(crate) struct GetArgs {
    #[command(flatten)]
    project: ProjectArgs,
}

/// Arguments for `prefs set`.
#[derive(Args)]
pub(crate) struct SetArgs {
    /// Package manager name: npm, yarn or pnpm.
    manager: String,

    #[command(flatten)]
    project: ProjectArgs,
}

/// Arguments for `prefs install`.
#[derive(Args)]
pub(crate) struct InstallArgs {
    /// Which install command to print.
    #[arg(value_enum, default_value_t = InstallKind::Cli)]
    kind: InstallKind,

    /// Print every manager's command, marking the selected one.
    #[arg(long)]
    all: bool,

    #[command(flatten)]
    project: ProjectArgs,
}

/// Install command variants shown in the docs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum InstallKind {
    /// Global install of the PalJS CLI.
    Cli,
    /// Project dependencies of a PalJS app.
    Project,
}

impl InstallKind {
    fn commands(self) -> PackageCommands {
        match self {
            Self::Cli => PackageCommands::cli_installation(),
            Self::Project => PackageCommands::project_installation(),
        }
    }
}

impl PrefsCommand {
    /// Whether verbose logging was requested.
    pub(crate) fn verbose(&self) -> bool {
        match self {
            Self::Get(args) => args.project.verbose,
            Self::Set(args) => args.project.verbose,
            Self::Install(args) => args.project.verbose,
        }
    }

    /// Execute the prefs subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load, the manager name is
    /// unknown, or the preference cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        match self {
            Self::Get(args) => {
                let store = open_store(&args.project.load_config()?)?;
                output.result(store.load().as_str());
            }
            Self::Set(args) => {
                let manager: PackageManager = args.manager.parse()?;
                let store = open_store(&args.project.load_config()?)?;
                store.load();
                store.try_set(manager)?;
                output.success(&format!("Package manager set to {manager}"));
            }
            Self::Install(args) => {
                let store = open_store(&args.project.load_config()?)?;
                let selected = store.load();
                for line in install_lines(&args.kind.commands(), selected, args.all) {
                    output.result(&line);
                }
            }
        }
        Ok(())
    }
}

/// Preference store backed by the configured file.
fn open_store(config: &Config) -> Result<PreferenceStore, CliError> {
    let prefs = &config.preferences_resolved;
    let default: PackageManager = prefs.default_package_manager.parse()?;
    Ok(
        PreferenceStore::new(Arc::new(FileBackend::new(&prefs.file)))
            .with_key(prefs.storage_key.as_str())
            .with_default(default),
    )
}

fn install_lines(commands: &PackageCommands, selected: PackageManager, all: bool) -> Vec<String> {
    if !all {
        return vec![commands.command_for(selected).to_owned()];
    }
    PackageManager::ALL
        .into_iter()
        .map(|manager| {
            let marker = if manager == selected { '*' } else { ' ' };
            let (name, rest) = commands.split_for(manager);
            format!("{marker} {name:<5} {rest}")
        })
        .collect()
}
