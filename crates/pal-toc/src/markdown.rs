//! Heading extraction from markdown source.
//!
//! Build-time counterpart of [`extract_headings`](crate::extract_headings):
//! derives the heading list straight from a document body, before any
//! rendering happens.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::heading::HeadingEntry;
use crate::slug::slugify;

/// Heading being collected.
struct OpenHeading {
    level: u8,
    id: Option<String>,
    text: String,
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Extract all headings (levels 1-6) from markdown.
///
/// Text includes inline code and emphasised spans. An explicit `{#id}`
/// attribute is used as the slug verbatim; otherwise the text is slugified.
/// Headings without text are skipped.
pub fn headings_from_markdown(markdown: &str) -> Vec<HeadingEntry> {
    let options = Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut headings = Vec::new();
    let mut open: Option<OpenHeading> = None;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                open = Some(OpenHeading {
                    level: heading_level_to_num(level),
                    id: id.map(|id| id.to_string()),
                    text: String::new(),
                });
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = open.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = open.as_mut() {
                    heading.text.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some(heading) = open.take() else {
                    continue;
                };
                let text = heading.text.trim();
                if text.is_empty() {
                    continue;
                }
                let slug = heading.id.unwrap_or_else(|| slugify(text));
                headings.push(HeadingEntry::new(heading.level, text, slug));
            }
            _ => {}
        }
    }

    headings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_levels_extracted() {
        let markdown = "# CLI\n\nIntro text.\n\n## Installation\n\n### Global install\n\n#### Flags\n";

        let headings = headings_from_markdown(markdown);

        assert_eq!(
            headings,
            vec![
                HeadingEntry::new(1, "CLI", "cli"),
                HeadingEntry::new(2, "Installation", "installation"),
                HeadingEntry::new(3, "Global install", "global-install"),
                HeadingEntry::new(4, "Flags", "flags"),
            ]
        );
    }

    #[test]
    fn test_inline_formatting_included_in_text() {
        let headings = headings_from_markdown("## The `pal generate` **command**\n");

        assert_eq!(headings[0].text, "The pal generate command");
        assert_eq!(headings[0].slug, "the-pal-generate-command");
    }

    #[test]
    fn test_explicit_id_used_verbatim() {
        let headings = headings_from_markdown("## Getting Started {#start_here}\n");

        assert_eq!(headings[0].text, "Getting Started");
        assert_eq!(headings[0].slug, "start_here");
    }

    #[test]
    fn test_setext_heading() {
        let headings = headings_from_markdown("Overview\n--------\n\nBody.\n");

        assert_eq!(headings, vec![HeadingEntry::new(2, "Overview", "overview")]);
    }

    #[test]
    fn test_empty_heading_skipped() {
        let headings = headings_from_markdown("##\n\n## Usage\n");

        assert_eq!(headings, vec![HeadingEntry::new(2, "Usage", "usage")]);
    }

    #[test]
    fn test_code_fence_hash_is_not_heading() {
        let markdown = "## Setup\n\n```bash\n# not a heading\npnpm add @paljs/cli\n```\n";

        let headings = headings_from_markdown(markdown);

        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].slug, "setup");
    }

    #[test]
    fn test_duplicate_slugs_not_disambiguated() {
        let headings = headings_from_markdown("## Options\n\n## Options\n");

        assert_eq!(headings[0].slug, "options");
        assert_eq!(headings[1].slug, "options");
    }
}
