//! Batching of heading re-extraction.
//!
//! Content can arrive after a page reports ready, and a single content
//! update usually shows up as a burst of node changes. The scheduler turns
//! those signals into at most one pending extraction pass: one shortly
//! after the page becomes ready, and one after each burst once the content
//! has been quiet for the debounce window.
//!
//! The scheduler keeps no clock of its own. Callers record signals and
//! poll with [`take_due`](ExtractionScheduler::take_due); the `*_at`
//! variants take an explicit instant for deterministic tests.

use std::time::{Duration, Instant};

/// Default wait after the page becomes ready.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(100);

/// Default quiet period closing a mutation burst.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Deadline tracker for extraction passes.
#[derive(Debug, Clone)]
pub struct ExtractionScheduler {
    initial_delay: Duration,
    debounce: Duration,
    deadline: Option<Instant>,
}

impl ExtractionScheduler {
    /// Create a scheduler with the given ready delay and debounce window.
    #[must_use]
    pub fn new(initial_delay: Duration, debounce: Duration) -> Self {
        Self {
            initial_delay,
            debounce,
            deadline: None,
        }
    }

    /// Delay between page ready and the first pass.
    #[must_use]
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Quiet period that closes a burst.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Record that the page became ready.
    pub fn page_ready(&mut self) {
        self.page_ready_at(Instant::now());
    }

    /// Record that the page became ready at `now`.
    pub fn page_ready_at(&mut self, now: Instant) {
        self.push_deadline(now + self.initial_delay);
    }

    /// Record one content mutation.
    pub fn record_mutation(&mut self) {
        self.record_mutation_at(Instant::now());
    }

    /// Record one content mutation at `now`.
    ///
    /// Each mutation extends the pending pass so a burst yields one pass.
    pub fn record_mutation_at(&mut self, now: Instant) {
        self.push_deadline(now + self.debounce);
    }

    /// Whether a pass is due now; clears the pending pass if so.
    pub fn take_due(&mut self) -> bool {
        self.take_due_at(Instant::now())
    }

    /// Whether a pass is due at `now`; clears the pending pass if so.
    pub fn take_due_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a pass is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending pass becomes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drop any pending pass (view torn down).
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    fn push_deadline(&mut self, candidate: Instant) {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.max(candidate),
            None => candidate,
        });
    }
}

impl Default for ExtractionScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_DELAY, DEFAULT_DEBOUNCE)
    }
}
