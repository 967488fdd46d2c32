//! Per-view table-of-contents state.

use std::time::Instant;

use crate::document::HeadingDocument;
use crate::extract::extract_headings;
use crate::heading::{HeadingEntry, TocItem, TocLevels, toc_view};
use crate::schedule::ExtractionScheduler;
use crate::tracker::{ActiveSectionTracker, IntersectionEvent, TrackerState, VisibilityObserver};

/// Where the heading list comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HeadingSource {
    Supplied,
    Derived,
}

/// Table of contents for one mounted documentation view.
///
/// Owns the rendered document, the active-section tracker and, for derived
/// heading lists, the extraction schedule. A session is created per view
/// and dropped on navigation, which releases all visibility watches.
pub struct TocSession<D: HeadingDocument, O: VisibilityObserver> {
    document: D,
    tracker: ActiveSectionTracker<O>,
    scheduler: ExtractionScheduler,
    source: HeadingSource,
    headings: Vec<HeadingEntry>,
}

impl<D: HeadingDocument, O: VisibilityObserver> TocSession<D, O> {
    /// Session that derives its headings from `document`.
    ///
    /// Nothing is extracted until the schedule fires; call
    /// [`page_ready_at`](Self::page_ready_at) once the page is shown.
    pub fn derived(document: D, observer: O, scheduler: ExtractionScheduler) -> Self {
        Self {
            document,
            tracker: ActiveSectionTracker::new(observer),
            scheduler,
            source: HeadingSource::Derived,
            headings: Vec::new(),
        }
    }

    /// Session over an explicitly supplied heading list.
    ///
    /// Headings are observed immediately and content mutations are ignored.
    pub fn with_headings(document: D, observer: O, headings: Vec<HeadingEntry>) -> Self {
        let mut tracker = ActiveSectionTracker::new(observer);
        tracker.observe_headings(&headings);
        Self {
            document,
            tracker,
            scheduler: ExtractionScheduler::default(),
            source: HeadingSource::Supplied,
            headings,
        }
    }

    /// Record that the page became ready.
    pub fn page_ready_at(&mut self, now: Instant) {
        if self.source == HeadingSource::Derived {
            self.scheduler.page_ready_at(now);
        }
    }

    /// Record a mutation of the content subtree.
    pub fn content_mutated_at(&mut self, now: Instant) {
        if self.source == HeadingSource::Derived {
            self.scheduler.record_mutation_at(now);
        }
    }

    /// Run the pending extraction pass if it is due; returns whether one ran.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if !self.scheduler.take_due_at(now) {
            return false;
        }
        self.refresh();
        true
    }

    /// Re-extract headings now and re-establish observation.
    ///
    /// Supplied sessions keep their list and only re-observe it.
    pub fn refresh(&mut self) {
        if self.source == HeadingSource::Derived {
            self.headings = extract_headings(&mut self.document);
        }
        self.tracker.observe_headings(&self.headings);
    }

    /// Feed a visibility change; returns whether the active slug changed.
    pub fn handle_intersection(&mut self, event: &IntersectionEvent) -> bool {
        self.tracker.handle(event)
    }

    /// Current heading list.
    pub fn headings(&self) -> &[HeadingEntry] {
        &self.headings
    }

    /// Slug of the heading at the reader's position.
    pub fn active_slug(&self) -> Option<&str> {
        self.tracker.active_slug()
    }

    /// Tracker lifecycle state.
    pub fn state(&self) -> TrackerState {
        self.tracker.state()
    }

    /// Display lines for `levels` with the active heading marked.
    pub fn view(&self, levels: TocLevels) -> Vec<TocItem> {
        toc_view(&self.headings, levels, self.active_slug())
    }

    /// The rendered document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// The rendered document, mutably.
    ///
    /// Callers changing content should report it through
    /// [`content_mutated_at`](Self::content_mutated_at).
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// The active-section tracker.
    pub fn tracker(&self) -> &ActiveSectionTracker<O> {
        &self.tracker
    }

    /// The active-section tracker, mutably.
    pub fn tracker_mut(&mut self) -> &mut ActiveSectionTracker<O> {
        &mut self.tracker
    }

    /// The extraction schedule.
    pub fn scheduler(&self) -> &ExtractionScheduler {
        &self.scheduler
    }
}
