//! YAML frontmatter parsing.

use serde::Deserialize;

use crate::error::FrontmatterError;

const DELIMITER: &str = "---";

/// Frontmatter fields as written.
#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    title: Option<String>,
    group: Option<String>,
    order: Option<i64>,
    description: Option<String>,
    toc: Option<bool>,
}

/// Validated frontmatter of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frontmatter {
    /// Page title.
    pub title: String,
    /// Sidebar group.
    pub group: String,
    /// Position within the group.
    pub order: Option<i64>,
    /// Summary for listings and meta tags.
    pub description: Option<String>,
    /// Whether the page shows a table of contents.
    pub toc: bool,
}

/// Split `content` into its frontmatter YAML and the body after it.
///
/// The file must open with a `---` line; the block ends at the next line
/// consisting of `---` alone.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str), FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = strip_delimiter_line(content) else {
        return Err(FrontmatterError::Missing);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

/// Parse a document into validated frontmatter and body.
pub fn parse(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let (yaml, body) = split_frontmatter(content)?;

    let raw: RawFrontmatter = if yaml.trim().is_empty() {
        RawFrontmatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    let title = required(raw.title, "title")?;
    let group = required(raw.group, "group")?;

    Ok((
        Frontmatter {
            title,
            group,
            order: raw.order,
            description: raw.description.filter(|d| !d.trim().is_empty()),
            toc: raw.toc.unwrap_or(true),
        },
        body,
    ))
}

fn strip_delimiter_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(DELIMITER)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, FrontmatterError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        _ => Err(FrontmatterError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_all_fields() {
        let content = "---\ntitle: Introduction\ngroup: Getting Started\norder: 1\ndescription: What PalJS is\ntoc: false\n---\n\n# Introduction\n";

        let (fm, body) = parse(content).unwrap();

        assert_eq!(
            fm,
            Frontmatter {
                title: "Introduction".to_owned(),
                group: "Getting Started".to_owned(),
                order: Some(1),
                description: Some("What PalJS is".to_owned()),
                toc: false,
            }
        );
        assert_eq!(body, "\n# Introduction\n");
    }

    #[test]
    fn test_optional_fields_default() {
        let (fm, _) = parse("---\ntitle: CLI\ngroup: Packages\n---\nBody").unwrap();

        assert_eq!(fm.order, None);
        assert_eq!(fm.description, None);
        assert!(fm.toc);
    }

    #[test]
    fn test_quoted_and_crlf() {
        let content = "---\r\ntitle: \"Prisma: Nexus\"\r\ngroup: 'MDC Templates'\r\n---\r\nBody";

        let (fm, body) = parse(content).unwrap();

        assert_eq!(fm.title, "Prisma: Nexus");
        assert_eq!(fm.group, "MDC Templates");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_missing_block() {
        assert!(matches!(parse("# No frontmatter"), Err(FrontmatterError::Missing)));
    }

    #[test]
    fn test_unterminated_block() {
        assert!(matches!(
            parse("---\ntitle: x\ngroup: y\n"),
            Err(FrontmatterError::Unterminated)
        ));
    }

    #[test]
    fn test_missing_required_fields() {
        assert!(matches!(
            parse("---\ngroup: Packages\n---\n"),
            Err(FrontmatterError::MissingField("title"))
        ));
        assert!(matches!(
            parse("---\ntitle: CLI\n---\n"),
            Err(FrontmatterError::MissingField("group"))
        ));
        assert!(matches!(
            parse("---\n---\n"),
            Err(FrontmatterError::MissingField("title"))
        ));
        assert!(matches!(
            parse("---\ntitle: '  '\ngroup: Packages\n---\n"),
            Err(FrontmatterError::MissingField("title"))
        ));
    }

    #[test]
    fn test_invalid_yaml_and_types() {
        assert!(matches!(
            parse("---\ntitle: [broken\n---\n"),
            Err(FrontmatterError::Yaml(_))
        ));
        assert!(matches!(
            parse("---\ntitle: CLI\ngroup: Packages\norder: first\n---\n"),
            Err(FrontmatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let (fm, _) = parse("---\ntitle: CLI\ngroup: Packages\nslug: cli\n---\n").unwrap();

        assert_eq!(fm.title, "CLI");
    }

    #[test]
    fn test_horizontal_rule_in_body_kept() {
        let (_, body) = parse("---\ntitle: A\ngroup: B\n---\nabove\n\n---\n\nbelow\n").unwrap();

        assert_eq!(body, "above\n\n---\n\nbelow\n");
    }
}
