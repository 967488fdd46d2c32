//! Table of contents and active-section tracking for paldocs.
//!
//! # Headings
//!
//! Heading lists come from two places:
//! - [`headings_from_markdown`] derives them from a document body at build time
//! - [`extract_headings`] reads them from a rendered page ([`HeadingDocument`]),
//!   assigning identifiers to headings that lack one
//!
//! [`toc_view`] filters a list to the displayed levels ([`TocLevels`], 2 and 3
//! by default) and marks the active entry.
//!
//! # Tracking
//!
//! [`ActiveSectionTracker`] watches heading elements through a
//! [`VisibilityObserver`] and keeps the slug of the heading most recently
//! reached. [`LayoutViewport`] is a geometry-based observer.
//! [`TocSession`] ties a document, a tracker and an [`ExtractionScheduler`]
//! together for one page view.
//!
//! # Example
//!
//! ```
//! use pal_toc::{HtmlDocument, TocLevels, extract_headings, toc_view};
//!
//! let mut doc = HtmlDocument::new("<h1>CLI</h1><h2>Install</h2><h3>Global</h3>");
//! let headings = extract_headings(&mut doc);
//!
//! let view = toc_view(&headings, TocLevels::default(), Some("global"));
//! assert_eq!(view.len(), 2);
//! assert!(view[1].active && view[1].indent);
//! assert!(doc.html().contains(r#"<h2 id="install">"#));
//! ```

mod document;
mod extract;
mod heading;
mod markdown;
mod schedule;
mod session;
mod slug;
mod tracker;
mod viewport;

pub use document::{HeadingDocument, HtmlDocument, RawHeading};
pub use extract::extract_headings;
pub use heading::{HeadingEntry, TocItem, TocLevels, toc_entries, toc_view};
pub use markdown::headings_from_markdown;
pub use schedule::{DEFAULT_DEBOUNCE, DEFAULT_INITIAL_DELAY, ExtractionScheduler};
pub use session::TocSession;
pub use slug::slugify;
pub use tracker::{ActiveSectionTracker, IntersectionEvent, TrackerState, VisibilityObserver};
pub use viewport::{DEFAULT_BOTTOM_MARGIN_PERCENT, ElementRect, LayoutViewport, ObservationZone};
