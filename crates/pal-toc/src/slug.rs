//! Heading text to URL fragment conversion.

/// Convert heading text to a URL fragment.
///
/// Lowercases ASCII letters, keeps ASCII digits, turns each run of
/// whitespace and hyphens into a single hyphen, drops everything else, and
/// trims hyphens from both ends. The result is stable under re-application.
///
/// # Examples
///
/// ```
/// use pal_toc::slugify;
///
/// assert_eq!(slugify("Getting Started!!"), "getting-started");
/// assert_eq!(slugify("getting-started"), "getting-started");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}
