//! paldocs CLI - PalJS documentation portal tooling.
//!
//! Provides commands for:
//! - `nav`: Print the sidebar navigation tree
//! - `page`: Show prev/next links and table of contents for a document
//! - `headings`: Extract and assign heading ids in rendered HTML
//! - `prefs get|set|install`: Manage the package-manager preference

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{HeadingsArgs, NavArgs, PageArgs, PrefsCommand};
use output::Output;

/// paldocs - PalJS documentation portal tooling.
#[derive(Parser)]
#[command(name = "paldocs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sidebar navigation tree.
    Nav(NavArgs),
    /// Show navigation and table of contents for one document.
    Page(PageArgs),
    /// Extract headings from a rendered HTML page.
    Headings(HeadingsArgs),
    /// Package-manager preference commands.
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Nav(args) => args.project.verbose,
            Self::Page(args) => args.project.verbose,
            Self::Headings(args) => args.project.verbose,
            Self::Prefs(cmd) => cmd.verbose(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Nav(args) => args.execute(),
        Commands::Page(args) => args.execute(),
        Commands::Headings(args) => args.execute(),
        Commands::Prefs(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
