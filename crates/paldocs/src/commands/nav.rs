//! `paldocs nav` command implementation.

use clap::Args;
use pal_nav::NavGroup;

use super::{ProjectArgs, indexer, load_collection};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Mark the group containing this document path as expanded.
    #[arg(long)]
    current: Option<String>,

    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or content loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config()?;
        let collection = load_collection(&config)?;

        let tree = indexer(&config).build_tree(&collection.entries());

        if self.json {
            output.json(&tree)?;
            return Ok(());
        }

        if tree.is_empty() {
            output.warning(&format!(
                "No documents found in {}",
                config.docs_resolved.source_dir.display()
            ));
            return Ok(());
        }

        for line in render_tree(&tree, self.current.as_deref()) {
            match line {
                Line::Group(text) => output.heading(&text),
                Line::Item(text) => output.result(&text),
                Line::Collapsed(text) => output.muted(&text),
            }
        }
        Ok(())
    }
}

/// One line of the text tree.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Group(String),
    Item(String),
    Collapsed(String),
}

/// Render groups as text; with `current`, only its group lists items.
fn render_tree(tree: &[NavGroup], current: Option<&str>) -> Vec<Line> {
    let mut lines = Vec::new();
    for group in tree {
        let expanded = current.is_none_or(|path| group.contains_path(path));
        if !expanded {
            lines.push(Line::Collapsed(format!("{} ({})", group.title, group.items.len())));
            continue;
        }
        lines.push(Line::Group(group.title.clone()));
        for item in &group.items {
            let marker = if current == Some(item.href.as_str()) { '>' } else { ' ' };
            lines.push(Line::Item(format!("{marker} {}  {}", item.title, item.href)));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pal_nav::{DocEntry, NavIndexer};
    use pretty_assertions::assert_eq;

    fn tree() -> Vec<NavGroup> {
        let entries = vec![
            DocEntry::new("Introduction", "Getting Started", "/docs/introduction").with_order(1),
            DocEntry::new("CLI", "Packages", "/docs/packages/cli"),
        ];
        NavIndexer::new()
            .with_group_orders([("Getting Started", 1), ("Packages", 2)])
            .build_tree(&entries)
    }

    #[test]
    fn test_render_full_tree() {
        let lines = render_tree(&tree(), None);

        assert_eq!(
            lines,
            vec![
                Line::Group("Getting Started".to_owned()),
                Line::Item("  Introduction  /docs/introduction".to_owned()),
                Line::Group("Packages".to_owned()),
                Line::Item("  CLI  /docs/packages/cli".to_owned()),
            ]
        );
    }

    #[test]
    fn test_render_with_current_collapses_other_groups() {
        let lines = render_tree(&tree(), Some("/docs/packages/cli"));

        assert_eq!(
            lines,
            vec![
                Line::Collapsed("Getting Started (1)".to_owned()),
                Line::Group("Packages".to_owned()),
                Line::Item("> CLI  /docs/packages/cli".to_owned()),
            ]
        );
    }
}
