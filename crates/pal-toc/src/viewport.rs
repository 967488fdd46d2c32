//! Geometry-based visibility observation.
//!
//! [`LayoutViewport`] models a scrolling viewport over laid-out heading
//! elements and reports intersection transitions against an
//! [`ObservationZone`], the band of the viewport in which a heading counts
//! as reached. With the default zone a heading is reached once it is within
//! the top 20% of the viewport.

use std::collections::HashMap;

use crate::tracker::{IntersectionEvent, VisibilityObserver};

/// Default share of the viewport excluded from the bottom of the zone.
pub const DEFAULT_BOTTOM_MARGIN_PERCENT: u8 = 80;

/// Band of the viewport in which an element counts as intersecting.
///
/// Margins are fractions of the viewport height removed from the top and
/// bottom edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObservationZone {
    /// Fraction removed from the top edge.
    pub top_margin: f64,
    /// Fraction removed from the bottom edge.
    pub bottom_margin: f64,
}

impl ObservationZone {
    /// Zone that keeps the top `100 - percent`% of the viewport.
    ///
    /// Percentages above 99 are clamped to 99.
    #[must_use]
    pub fn from_bottom_margin_percent(percent: u8) -> Self {
        Self {
            top_margin: 0.0,
            bottom_margin: f64::from(percent.min(99)) / 100.0,
        }
    }

    /// Document-space `[start, end)` of the zone.
    #[must_use]
    pub fn bounds(&self, scroll_top: f64, viewport_height: f64) -> (f64, f64) {
        let start = scroll_top + viewport_height * self.top_margin;
        let end = scroll_top + viewport_height * (1.0 - self.bottom_margin);
        (start, end)
    }

    /// Whether `rect` overlaps the zone.
    #[must_use]
    pub fn intersects(&self, rect: ElementRect, scroll_top: f64, viewport_height: f64) -> bool {
        let (start, end) = self.bounds(scroll_top, viewport_height);
        if rect.bottom <= rect.top {
            return rect.top >= start && rect.top < end;
        }
        rect.top < end && rect.bottom > start
    }
}

impl Default for ObservationZone {
    fn default() -> Self {
        Self::from_bottom_margin_percent(DEFAULT_BOTTOM_MARGIN_PERCENT)
    }
}

/// Vertical extent of an element in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementRect {
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl ElementRect {
    /// Create a rectangle spanning `top..bottom`.
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}

/// Scrollable viewport over laid-out elements.
///
/// Implements [`VisibilityObserver`]: watching an element queues an event
/// with its current state, and every scroll queues one event per watched
/// element whose state changed, in watch order.
#[derive(Debug, Clone)]
pub struct LayoutViewport {
    zone: ObservationZone,
    viewport_height: f64,
    scroll_top: f64,
    elements: HashMap<String, ElementRect>,
    /// Watched slugs with their last reported state.
    watched: Vec<(String, bool)>,
    pending: Vec<IntersectionEvent>,
}

impl LayoutViewport {
    /// Create a viewport of `viewport_height` scrolled to the top.
    #[must_use]
    pub fn new(zone: ObservationZone, viewport_height: f64) -> Self {
        Self {
            zone,
            viewport_height,
            scroll_top: 0.0,
            elements: HashMap::new(),
            watched: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Add an element (builder form).
    #[must_use]
    pub fn with_element(mut self, slug: impl Into<String>, rect: ElementRect) -> Self {
        self.set_element(slug, rect);
        self
    }

    /// Add or move an element.
    pub fn set_element(&mut self, slug: impl Into<String>, rect: ElementRect) {
        self.elements.insert(slug.into(), rect);
    }

    /// Remove an element; a watch on it stops reporting.
    pub fn remove_element(&mut self, slug: &str) {
        self.elements.remove(slug);
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Scroll to `scroll_top` and return all queued transitions.
    pub fn scroll_to(&mut self, scroll_top: f64) -> Vec<IntersectionEvent> {
        self.scroll_top = scroll_top;

        for (slug, reported) in &mut self.watched {
            let Some(rect) = self.elements.get(slug.as_str()) else {
                continue;
            };
            let now = self
                .zone
                .intersects(*rect, self.scroll_top, self.viewport_height);
            if now != *reported {
                *reported = now;
                self.pending.push(IntersectionEvent {
                    slug: slug.clone(),
                    is_intersecting: now,
                });
            }
        }

        self.take_events()
    }

    /// Drain queued transitions.
    pub fn take_events(&mut self) -> Vec<IntersectionEvent> {
        std::mem::take(&mut self.pending)
    }

    fn is_intersecting(&self, slug: &str) -> Option<bool> {
        self.elements
            .get(slug)
            .map(|rect| self.zone.intersects(*rect, self.scroll_top, self.viewport_height))
    }
}

impl VisibilityObserver for LayoutViewport {
    fn observe(&mut self, slug: &str) -> bool {
        let Some(now) = self.is_intersecting(slug) else {
            return false;
        };
        if self.watched.iter().any(|(watched, _)| watched == slug) {
            return true;
        }
        self.watched.push((slug.to_owned(), now));
        self.pending.push(IntersectionEvent {
            slug: slug.to_owned(),
            is_intersecting: now,
        });
        true
    }

    fn unobserve(&mut self, slug: &str) {
        self.watched.retain(|(watched, _)| watched != slug);
        self.pending.retain(|event| event.slug != slug);
    }
}
