//! Heading extraction from a rendered document.

use crate::document::HeadingDocument;
use crate::heading::HeadingEntry;
use crate::slug::slugify;

/// Extract the heading list of a rendered document.
///
/// Every heading level is returned. Text is trimmed and headings without
/// text are dropped. A heading that already carries an identifier keeps it
/// as its slug; otherwise the slug is derived from the text and written
/// back to the element so in-page anchors resolve. Duplicate slugs are
/// left as they are.
///
/// Each call produces a complete, fresh list.
pub fn extract_headings<D>(document: &mut D) -> Vec<HeadingEntry>
where
    D: HeadingDocument + ?Sized,
{
    let raw = document.scan_headings();
    let mut headings = Vec::with_capacity(raw.len());
    let mut assigned = 0usize;

    for (index, heading) in raw.into_iter().enumerate() {
        let text = heading.text.trim();
        if text.is_empty() {
            continue;
        }

        let slug = match heading.id {
            Some(id) if !id.is_empty() => id,
            _ => {
                let slug = slugify(text);
                if !slug.is_empty() {
                    document.set_heading_id(index, &slug);
                    assigned += 1;
                }
                slug
            }
        };

        headings.push(HeadingEntry::new(heading.level, text, slug));
    }

    tracing::debug!(
        heading_count = headings.len(),
        assigned_ids = assigned,
        "Headings extracted"
    );
    headings
}
