//! `paldocs headings` command implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::Args;
use notify::{RecursiveMode, Watcher};
use pal_toc::{ExtractionScheduler, HeadingEntry, HtmlDocument, extract_headings};

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Longest wait between checks while watching.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Arguments for the headings command.
#[derive(Args)]
pub(crate) struct HeadingsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Rendered HTML file to read.
    file: PathBuf,

    /// Write assigned heading ids back into the file.
    #[arg(long)]
    write: bool,

    /// Re-extract whenever the file changes.
    #[arg(long)]
    watch: bool,

    /// Print headings as JSON.
    #[arg(long)]
    json: bool,
}

/// Result of one extraction pass over a file.
#[derive(Debug)]
struct Pass {
    headings: Vec<HeadingEntry>,
    /// Ids were assigned and written to the file.
    written: bool,
}

impl HeadingsArgs {
    /// Execute the headings command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or watching fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let pass = run_pass(&self.file, self.write)?;
        self.report(&output, &pass)?;

        if self.watch {
            let config = self.project.load_config()?;
            let scheduler =
                ExtractionScheduler::new(config.extraction.initial_delay(), config.extraction.debounce());
            self.watch_file(&output, scheduler)?;
        }
        Ok(())
    }

    fn report(&self, output: &Output, pass: &Pass) -> Result<(), CliError> {
        if self.json {
            output.json(&pass.headings)?;
        } else if pass.headings.is_empty() {
            output.warning(&format!("No headings in {}", self.file.display()));
        } else {
            for heading in &pass.headings {
                let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
                output.result(&format!("{indent}h{} {}  #{}", heading.level, heading.text, heading.slug));
            }
        }
        if pass.written {
            output.success(&format!("Updated heading ids in {}", self.file.display()));
        }
        Ok(())
    }

    /// Re-run extraction once per burst of changes until the watcher stops.
    fn watch_file(&self, output: &Output, mut scheduler: ExtractionScheduler) -> Result<(), CliError> {
        let file = fs::canonicalize(&self.file)?;
        let dir = file.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let (tx, rx) = mpsc::channel();
        let target = file.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let Ok(event) = res else { return };
            if is_content_change(event.kind) && event.paths.iter().any(|p| p == &target) {
                let _ = tx.send(());
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        output.info(&format!("Watching {} (Ctrl+C to stop)", self.file.display()));
        tracing::info!(path = %file.display(), "Watching for changes");

        loop {
            let wait = scheduler
                .next_deadline()
                .map_or(POLL_INTERVAL, |deadline| {
                    deadline.saturating_duration_since(Instant::now()).min(POLL_INTERVAL)
                });

            match rx.recv_timeout(wait) {
                Ok(()) => scheduler.record_mutation(),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }

            if scheduler.take_due() {
                match run_pass(&self.file, self.write) {
                    Ok(pass) => {
                        output.info("");
                        self.report(output, &pass)?;
                    }
                    Err(e) => {
                        tracing::warn!(path = %self.file.display(), error = %e, "Extraction failed");
                    }
                }
            }
        }

        Ok(())
    }
}

fn is_content_change(kind: notify::EventKind) -> bool {
    matches!(
        kind,
        notify::EventKind::Create(_) | notify::EventKind::Modify(_)
    )
}

/// Extract headings from `path`, optionally persisting assigned ids.
fn run_pass(path: &Path, write: bool) -> Result<Pass, CliError> {
    let html = fs::read_to_string(path)?;
    let mut document = HtmlDocument::new(html.as_str());
    let headings = extract_headings(&mut document);

    let written = write && document.html() != html;
    if written {
        fs::write(path, document.into_html())?;
    }
    tracing::debug!(path = %path.display(), count = headings.len(), written, "Extraction pass");

    Ok(Pass { headings, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pass_without_write_leaves_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("page.html");
        fs::write(&path, "<h1>CLI</h1><h2>Install</h2>").unwrap();

        let pass = run_pass(&path, false).unwrap();

        assert_eq!(pass.headings.len(), 2);
        assert!(!pass.written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<h1>CLI</h1><h2>Install</h2>");
    }

    #[test]
    fn test_pass_with_write_assigns_ids_once() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("page.html");
        fs::write(&path, r#"<h2 id="setup">Setup</h2><h2>Usage</h2>"#).unwrap();

        let first = run_pass(&path, true).unwrap();
        let second = run_pass(&path, true).unwrap();

        assert!(first.written);
        assert!(!second.written);
        assert_eq!(first.headings, second.headings);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"<h2 id="setup">Setup</h2><h2 id="usage">Usage</h2>"#
        );
    }

    #[test]
    fn test_pass_missing_file() {
        let temp = tempfile::tempdir().unwrap();

        assert!(matches!(
            run_pass(&temp.path().join("missing.html"), false),
            Err(CliError::Io(_))
        ));
    }
}
