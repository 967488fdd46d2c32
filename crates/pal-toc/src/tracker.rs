//! Active-section tracking.
//!
//! [`ActiveSectionTracker`] registers the elements of the current heading
//! list with a [`VisibilityObserver`] and records which heading most
//! recently entered the observation zone. The observer is the environment
//! seam: a browser binding, a layout model such as
//! [`LayoutViewport`](crate::LayoutViewport), or a test fake.

use crate::heading::HeadingEntry;

/// Capability to watch heading elements for visibility changes.
pub trait VisibilityObserver {
    /// Start watching the element whose identifier is `slug`.
    ///
    /// Returns `false` if no such element exists; nothing is watched then.
    fn observe(&mut self, slug: &str) -> bool;

    /// Stop watching the element whose identifier is `slug`.
    fn unobserve(&mut self, slug: &str);
}

/// Visibility change of one watched element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntersectionEvent {
    /// Identifier of the element.
    pub slug: String,
    /// Whether the element is now inside the observation zone.
    pub is_intersecting: bool,
}

impl IntersectionEvent {
    /// Element entered the zone.
    pub fn entered(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            is_intersecting: true,
        }
    }

    /// Element left the zone.
    pub fn left(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            is_intersecting: false,
        }
    }
}

/// Lifecycle state of a tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerState {
    /// No heading elements watched; no active section.
    Idle,
    /// At least one heading element is watched.
    Observing,
}

/// Tracks the heading at the reader's position.
///
/// "Latest event wins": every event reporting a watched element entering the
/// zone makes that element's slug active, regardless of which other
/// headings are also inside the zone.
///
/// Dropping the tracker releases every watch.
pub struct ActiveSectionTracker<O: VisibilityObserver> {
    observer: O,
    observed: Vec<String>,
    active: Option<String>,
}

impl<O: VisibilityObserver> ActiveSectionTracker<O> {
    /// Create an idle tracker over `observer`.
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            observed: Vec::new(),
            active: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrackerState {
        if self.observed.is_empty() {
            TrackerState::Idle
        } else {
            TrackerState::Observing
        }
    }

    /// Replace the watched heading set.
    ///
    /// Watches for the previous set are released first. Headings whose
    /// element cannot be resolved are skipped. Duplicate slugs are watched
    /// once.
    pub fn observe_headings(&mut self, headings: &[HeadingEntry]) {
        self.release();

        let mut skipped = 0usize;
        for heading in headings {
            if heading.slug.is_empty() || self.observed.contains(&heading.slug) {
                continue;
            }
            if self.observer.observe(&heading.slug) {
                self.observed.push(heading.slug.clone());
            } else {
                skipped += 1;
                tracing::debug!(slug = %heading.slug, "Heading element not found");
            }
        }

        tracing::debug!(
            observed = self.observed.len(),
            skipped,
            "Heading observation established"
        );
    }

    /// Apply one visibility change; returns whether the active slug changed.
    pub fn handle(&mut self, event: &IntersectionEvent) -> bool {
        if !event.is_intersecting || !self.observed.contains(&event.slug) {
            return false;
        }
        if self.active.as_deref() == Some(event.slug.as_str()) {
            return false;
        }
        self.active = Some(event.slug.clone());
        true
    }

    /// Apply events in order; returns whether the active slug changed.
    pub fn handle_all<'a, I>(&mut self, events: I) -> bool
    where
        I: IntoIterator<Item = &'a IntersectionEvent>,
    {
        let before = self.active.clone();
        for event in events {
            self.handle(event);
        }
        self.active != before
    }

    /// Slug of the heading at the reader's position.
    pub fn active_slug(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Slugs currently watched, in registration order.
    pub fn observed_slugs(&self) -> &[String] {
        &self.observed
    }

    /// The underlying observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The underlying observer, mutably (e.g. to drive scrolling).
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Release every watch and return to [`TrackerState::Idle`].
    pub fn release(&mut self) {
        for slug in self.observed.drain(..) {
            self.observer.unobserve(&slug);
        }
        self.active = None;
    }
}

impl<O: VisibilityObserver> Drop for ActiveSectionTracker<O> {
    fn drop(&mut self) {
        self.release();
    }
}
