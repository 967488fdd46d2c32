//! Rendered-document access for heading extraction.
//!
//! [`HeadingDocument`] is the capability the extractor needs from whatever
//! holds the rendered page: list heading elements and write an identifier
//! back onto one. [`HtmlDocument`] implements it over an HTML string.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `<hN attrs>inner</hM>`; callers check N == M.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h([1-6])(\s[^>]*)?>(.*?)</h([1-6])\s*>").unwrap());

/// `id="..."`, `id='...'` or unquoted `id=...` inside an attribute list.
static ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#).unwrap()
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Heading element as found in a document, before slug resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawHeading {
    /// Heading level (1-6).
    pub level: u8,
    /// Text content, untrimmed.
    pub text: String,
    /// Identifier already present on the element.
    pub id: Option<String>,
}

/// Access to the heading elements of a rendered document.
pub trait HeadingDocument {
    /// All heading elements in document order.
    fn scan_headings(&self) -> Vec<RawHeading>;

    /// Set the identifier of the `index`-th heading returned by
    /// [`scan_headings`](Self::scan_headings).
    ///
    /// Out-of-range indices are ignored.
    fn set_heading_id(&mut self, index: usize, id: &str);
}

/// Rendered HTML held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    html: String,
}

impl HtmlDocument {
    /// Wrap rendered HTML.
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Current markup, including any assigned identifiers.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace the whole content (e.g. after navigation).
    pub fn replace(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    /// Consume the document, returning its markup.
    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    /// Well-formed heading matches in document order.
    fn headings(&self) -> impl Iterator<Item = Captures<'_>> {
        HEADING_RE
            .captures_iter(&self.html)
            .filter(|caps| caps[1] == caps[4])
    }
}

impl HeadingDocument for HtmlDocument {
    fn scan_headings(&self) -> Vec<RawHeading> {
        self.headings()
            .map(|caps| RawHeading {
                level: caps[1].parse().unwrap_or(1),
                text: decode_entities(&TAG_RE.replace_all(&caps[3], "")),
                id: caps
                    .get(2)
                    .and_then(|attrs| id_value(attrs.as_str()))
                    .map(decode_entities),
            })
            .collect()
    }

    fn set_heading_id(&mut self, index: usize, id: &str) {
        let escaped = escape_attr(id);

        let edit = self.headings().nth(index).map(|caps| {
            let attrs = caps.get(2);
            let existing = attrs.and_then(|attrs| {
                ID_ATTR_RE.captures(attrs.as_str()).and_then(|id_caps| {
                    let quoted = id_caps.get(1).or_else(|| id_caps.get(2));
                    let value = quoted.or_else(|| id_caps.get(3))?;
                    let range = (attrs.start() + value.start(), attrs.start() + value.end());
                    Some((range, quoted.is_some()))
                })
            });
            match existing {
                Some((range, true)) => (range, escaped.clone()),
                Some((range, false)) => (range, format!("\"{escaped}\"")),
                None => {
                    let at = attrs.map_or_else(|| caps.get(1).map_or(0, |m| m.end()), |m| m.end());
                    ((at, at), format!(" id=\"{escaped}\""))
                }
            }
        });

        if let Some(((start, end), replacement)) = edit {
            self.html.replace_range(start..end, &replacement);
        }
    }
}

/// Value of the `id` attribute in an attribute list.
fn id_value(attrs: &str) -> Option<&str> {
    let caps = ID_ATTR_RE.captures(attrs)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}

/// Decode the entities commonly emitted by markdown renderers.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Escape a value for a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_levels_text_and_ids() {
        let doc = HtmlDocument::new(
            r#"<h1>PalJS CLI</h1><p>x</p><h2 id="install">Install</h2><h3 class="sub">Global <code>pal</code></h3>"#,
        );

        let headings = doc.scan_headings();

        assert_eq!(
            headings,
            vec![
                RawHeading {
                    level: 1,
                    text: "PalJS CLI".to_owned(),
                    id: None,
                },
                RawHeading {
                    level: 2,
                    text: "Install".to_owned(),
                    id: Some("install".to_owned()),
                },
                RawHeading {
                    level: 3,
                    text: "Global pal".to_owned(),
                    id: None,
                },
            ]
        );
    }

    #[test]
    fn test_scan_decodes_entities_and_ignores_data_id() {
        let doc = HtmlDocument::new(r#"<h2 data-id="x">Q&amp;A &lt;tips&gt;</h2>"#);

        let headings = doc.scan_headings();

        assert_eq!(headings[0].text, "Q&A <tips>");
        assert_eq!(headings[0].id, None);
    }

    #[test]
    fn test_scan_multiline_and_uppercase_tags() {
        let doc = HtmlDocument::new("<H2 ID='upper'>\n  Upper\n</H2>");

        let headings = doc.scan_headings();

        assert_eq!(headings[0].level, 2);
        assert_eq!(headings[0].text, "\n  Upper\n");
        assert_eq!(headings[0].id, Some("upper".to_owned()));
    }

    #[test]
    fn test_set_id_inserted_without_attributes() {
        let mut doc = HtmlDocument::new("<h2>Usage</h2><h3>Options</h3>");

        doc.set_heading_id(1, "options");

        assert_eq!(doc.html(), r#"<h2>Usage</h2><h3 id="options">Options</h3>"#);
    }

    #[test]
    fn test_set_id_appended_after_attributes() {
        let mut doc = HtmlDocument::new(r#"<h2 class="title">Usage</h2>"#);

        doc.set_heading_id(0, "usage");

        assert_eq!(doc.html(), r#"<h2 class="title" id="usage">Usage</h2>"#);
        assert_eq!(doc.scan_headings()[0].id, Some("usage".to_owned()));
    }

    #[test]
    fn test_set_id_replaces_existing_value() {
        let mut doc = HtmlDocument::new(r#"<h2 id="old" class="x">Usage</h2>"#);

        doc.set_heading_id(0, "usage");

        assert_eq!(doc.html(), r#"<h2 id="usage" class="x">Usage</h2>"#);
    }

    #[test]
    fn test_scan_unquoted_id() {
        let doc = HtmlDocument::new("<h2 id=setup class=intro>Getting Started</h2>");

        assert_eq!(doc.scan_headings()[0].id, Some("setup".to_owned()));
    }

    #[test]
    fn test_set_id_replaces_unquoted_value() {
        let mut doc = HtmlDocument::new("<h2 id=old>Usage</h2>");

        doc.set_heading_id(0, "usage");

        assert_eq!(doc.html(), r#"<h2 id="usage">Usage</h2>"#);
    }

    #[test]
    fn test_extract_keeps_unquoted_id() {
        let mut doc = HtmlDocument::new("<h2 id=setup>Getting Started</h2>");

        let headings = crate::extract_headings(&mut doc);

        assert_eq!(headings[0].slug, "setup");
        assert_eq!(doc.html(), "<h2 id=setup>Getting Started</h2>");
    }

    #[test]
    fn test_set_id_out_of_range_ignored() {
        let mut doc = HtmlDocument::new("<h2>Usage</h2>");

        doc.set_heading_id(5, "nope");

        assert_eq!(doc.html(), "<h2>Usage</h2>");
    }

    #[test]
    fn test_mismatched_closing_tag_skipped() {
        let doc = HtmlDocument::new("<h2>Broken</h3><h2>Fine</h2>");

        let headings = doc.scan_headings();

        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Fine");
    }

    #[test]
    fn test_replace_content() {
        let mut doc = HtmlDocument::new("<h2>Old</h2>");

        doc.replace("<h2>New</h2><h2>Newer</h2>");

        assert_eq!(doc.scan_headings().len(), 2);
        assert_eq!(doc.into_html(), "<h2>New</h2><h2>Newer</h2>");
    }
}
