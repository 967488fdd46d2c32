//! `paldocs page` command implementation.

use clap::Args;
use pal_content::Collection;
use pal_nav::{NavIndexer, PrevNext};
use pal_toc::{TocItem, TocLevels, headings_from_markdown, toc_view};
use serde::Serialize;

use super::{ProjectArgs, indexer, load_collection};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Document path (`/docs/packages/cli`) or route form (`packages/cli`).
    path: String,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Navigation and table of contents of one document.
#[derive(Debug, Serialize)]
struct PageSummary {
    title: String,
    path: String,
    slug: String,
    group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(flatten)]
    links: PrevNext,
    toc: Vec<TocItem>,
}

impl PageArgs {
    /// Execute the page command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the document does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config()?;
        let collection = load_collection(&config)?;
        let levels = TocLevels::new(config.toc.min_level, config.toc.max_level);

        let summary = summarize(&collection, &indexer(&config), &self.path, levels)
            .ok_or_else(|| CliError::NotFound(format!("No document at {}", self.path)))?;

        if self.json {
            output.json(&summary)?;
            return Ok(());
        }

        print_summary(&output, &summary);
        Ok(())
    }
}

fn summarize(
    collection: &Collection,
    indexer: &NavIndexer,
    query: &str,
    levels: TocLevels,
) -> Option<PageSummary> {
    let doc = collection.get(query)?;
    let links = indexer.prev_next(&collection.entries(), doc.path());
    let toc = if doc.toc {
        toc_view(&headings_from_markdown(&doc.body), levels, None)
    } else {
        Vec::new()
    };

    Some(PageSummary {
        title: doc.title().to_owned(),
        path: doc.path().to_owned(),
        slug: doc.slug_as_params().to_owned(),
        group: doc.entry.group.clone(),
        description: doc.description.clone(),
        links,
        toc,
    })
}

fn print_summary(output: &Output, summary: &PageSummary) {
    output.heading(&summary.title);
    output.muted(&format!("{} ({})", summary.path, summary.group));
    if let Some(description) = &summary.description {
        output.result(description);
    }

    output.result("");
    match &summary.links.prev {
        Some(link) => output.result(&format!("Previous: {}  {}", link.title, link.href)),
        None => output.muted("Previous: -"),
    }
    match &summary.links.next {
        Some(link) => output.result(&format!("Next:     {}  {}", link.title, link.href)),
        None => output.muted("Next:     -"),
    }

    if summary.toc.is_empty() {
        return;
    }
    output.result("");
    output.heading("On this page");
    for item in &summary.toc {
        let indent = if item.indent { "    " } else { "  " };
        output.result(&format!("{indent}{}  #{}", item.text, item.slug));
    }
}
