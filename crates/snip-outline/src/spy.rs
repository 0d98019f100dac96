//! Scroll-spy state machine.
//!
//! Platform code (an `IntersectionObserver`, a scroll listener, a test) feeds
//! [`IntersectionEntry`] batches or [`HeadingRect`] samples in; [`ScrollSpy`]
//! decides which outline entry is active.

use snip_renderer::HeadingEntry;

use crate::band::{FocusBand, HeadingRect};

/// One observer notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn entering(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_intersecting: true,
        }
    }

    pub fn leaving(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_intersecting: false,
        }
    }
}

/// Tracks which observed heading is currently active.
#[derive(Debug, Default)]
pub struct ScrollSpy {
    band: FocusBand,
    sticky: bool,
    observed: Vec<String>,
    /// Observed ids inside the band, in the order they entered.
    inside: Vec<String>,
    active: Option<String>,
}

impl ScrollSpy {
    pub fn new(band: FocusBand) -> Self {
        Self {
            band,
            ..Self::default()
        }
    }

    /// Keep the last active id when no heading remains in the band.
    #[must_use]
    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    /// Replace the observation set.
    ///
    /// The previous set is torn down first and the active id is cleared. Entries whose id `resolve` rejects
    /// (no element on the page) are skipped. Returns the number of observed
    /// headings.
    pub fn observe<F>(&mut self, headings: &[HeadingEntry], mut resolve: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        self.inside.clear();
        self.observed = headings
            .iter()
            .filter(|heading| resolve(&heading.id))
            .map(|heading| heading.id.clone())
            .collect();

        // Ids are positional, so a new set may reuse the old ids for other headings.
        self.active = None;

        let skipped = headings.len() - self.observed.len();
        if skipped > 0 {
            tracing::debug!(skipped, "Outline entries without a matching element");
        }
        tracing::debug!(observed = self.observed.len(), "Observing headings");
        self.observed.len()
    }

    /// Stop observing and forget the active id.
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.inside.clear();
        self.active = None;
    }

    /// Apply one batch of observer notifications.
    ///
    /// Within a batch the last intersecting entry wins. Entries for ids that
    /// are not observed are ignored.
    pub fn record<I>(&mut self, entries: I) -> Option<&str>
    where
        I: IntoIterator<Item = IntersectionEntry>,
    {
        for entry in entries {
            if !self.observed.contains(&entry.id) {
                continue;
            }
            if entry.is_intersecting {
                if !self.inside.contains(&entry.id) {
                    self.inside.push(entry.id.clone());
                }
                self.active = Some(entry.id);
            } else {
                self.inside.retain(|id| *id != entry.id);
            }
        }

        if !self.sticky {
            let active_left = self
                .active
                .as_ref()
                .is_some_and(|id| !self.inside.contains(id));
            if active_left {
                self.active = self.inside.last().cloned();
            }
        }
        self.active()
    }

    /// Geometry fallback: derive notifications from heading positions.
    ///
    /// Only transitions are fed to [`record`](Self::record), in the order of
    /// `rects`. Observed headings missing from `rects` count as outside.
    pub fn sample(&mut self, rects: &[HeadingRect], viewport_height: f64) -> Option<&str> {
        let mut entries = Vec::new();
        for rect in rects {
            if !self.observed.contains(&rect.id) {
                continue;
            }
            let now = self.band.intersects(rect, viewport_height);
            let was = self.inside.contains(&rect.id);
            if now != was {
                entries.push(IntersectionEntry {
                    id: rect.id.clone(),
                    is_intersecting: now,
                });
            }
        }
        for id in &self.inside {
            if !rects.iter().any(|rect| rect.id == *id) {
                entries.push(IntersectionEntry::leaving(id.clone()));
            }
        }
        self.record(entries)
    }

    /// Currently active heading id.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Ids being observed, in document order.
    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    pub fn band(&self) -> FocusBand {
        self.band
    }
}

/// Minimum spacing between geometry samples.
#[derive(Clone, Copy, Debug)]
pub struct ScrollThrottle {
    pub interval_ms: f64,
    last: Option<f64>,
}

impl ScrollThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    /// Whether a sample may run at `now_ms`. Records the time when it may.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use snip_renderer::SectionId;

    use super::*;

    const VIEWPORT: f64 = 1000.0;

    fn headings(n: usize) -> Vec<HeadingEntry> {
        (0..n)
            .map(|j| HeadingEntry::new(SectionId::new(0, j), format!("Heading {j}")))
            .collect()
    }

    fn observed_spy(n: usize) -> ScrollSpy {
        let mut spy = ScrollSpy::new(FocusBand::default());
        spy.observe(&headings(n), |_| true);
        spy
    }

    fn rects(tops: &[f64]) -> Vec<HeadingRect> {
        tops.iter()
            .enumerate()
            .map(|(j, top)| HeadingRect::new(SectionId::new(0, j).to_string(), *top, top + 30.0))
            .collect()
    }

    #[test]
    fn test_band_over_middle_heading_activates_it() {
        let mut spy = observed_spy(3);
        let active = spy.sample(&rects(&[100.0, 415.0, 900.0]), VIEWPORT);
        assert_eq!(active, Some("section-0-1"));
    }

    #[test]
    fn test_band_over_nothing_clears_active() {
        let mut spy = observed_spy(3);
        spy.sample(&rects(&[100.0, 415.0, 900.0]), VIEWPORT);
        let active = spy.sample(&rects(&[-500.0, -185.0, 300.0]), VIEWPORT);
        assert_eq!(active, None);
    }

    #[test]
    fn test_sticky_keeps_last_active() {
        let mut spy = ScrollSpy::new(FocusBand::default()).with_sticky(true);
        spy.observe(&headings(3), |_| true);
        spy.sample(&rects(&[100.0, 415.0, 900.0]), VIEWPORT);
        let active = spy.sample(&rects(&[-500.0, -185.0, 300.0]), VIEWPORT);
        assert_eq!(active, Some("section-0-1"));
    }

    #[test]
    fn test_last_intersecting_entry_wins() {
        let mut spy = observed_spy(3);
        let active = spy.record([
            IntersectionEntry::entering("section-0-0"),
            IntersectionEntry::entering("section-0-2"),
            IntersectionEntry::entering("section-0-1"),
        ]);
        assert_eq!(active, Some("section-0-1"));
    }

    #[test]
    fn test_leaving_active_falls_back_to_remaining() {
        let mut spy = observed_spy(2);
        spy.record([
            IntersectionEntry::entering("section-0-0"),
            IntersectionEntry::entering("section-0-1"),
        ]);
        let active = spy.record([IntersectionEntry::leaving("section-0-1")]);
        assert_eq!(active, Some("section-0-0"));
    }

    #[test]
    fn test_leaving_non_active_keeps_active() {
        let mut spy = observed_spy(2);
        spy.record([
            IntersectionEntry::entering("section-0-0"),
            IntersectionEntry::entering("section-0-1"),
        ]);
        let active = spy.record([IntersectionEntry::leaving("section-0-0")]);
        assert_eq!(active, Some("section-0-1"));
    }

    #[test]
    fn test_unobserved_entries_are_ignored() {
        let mut spy = observed_spy(1);
        let active = spy.record([IntersectionEntry::entering("section-4-4")]);
        assert_eq!(active, None);
    }

    #[test]
    fn test_observe_skips_unresolvable_ids() {
        let mut spy = ScrollSpy::new(FocusBand::default());
        let count = spy.observe(&headings(3), |id| id != "section-0-1");
        assert_eq!(count, 2);
        assert_eq!(spy.observed(), ["section-0-0", "section-0-2"]);
        assert_eq!(spy.record([IntersectionEntry::entering("section-0-1")]), None);
    }

    #[test]
    fn test_switch_to_empty_outline_clears_active() {
        let mut spy = observed_spy(2);
        spy.record([IntersectionEntry::entering("section-0-0")]);
        assert_eq!(spy.observe(&[], |_| true), 0);
        assert_eq!(spy.active(), None);
    }

    #[test]
    fn test_reobserve_drops_stale_active() {
        let mut spy = observed_spy(3);
        spy.record([IntersectionEntry::entering("section-0-2")]);
        spy.observe(&headings(2), |_| true);
        assert_eq!(spy.active(), None);
        assert_eq!(spy.observed().len(), 2);
    }

    #[test]
    fn test_topic_switch_with_same_ids_clears_active() {
        for sticky in [false, true] {
            let mut spy = ScrollSpy::new(FocusBand::default()).with_sticky(sticky);
            spy.observe(&headings(5), |_| true);
            spy.record([IntersectionEntry::entering("section-0-3")]);
            assert_eq!(spy.active(), Some("section-0-3"));

            spy.observe(&headings(4), |_| true);
            assert_eq!(spy.active(), None, "sticky={sticky}");

            let initial = (0..4).map(|j| IntersectionEntry::leaving(SectionId::new(0, j).to_string()));
            assert_eq!(spy.record(initial), None, "sticky={sticky}");
        }
    }

    #[test]
    fn test_disconnect_resets() {
        let mut spy = observed_spy(2);
        spy.record([IntersectionEntry::entering("section-0-0")]);
        spy.disconnect();
        assert_eq!(spy.active(), None);
        assert!(spy.observed().is_empty());
        assert_eq!(spy.record([IntersectionEntry::entering("section-0-0")]), None);
    }

    #[test]
    fn test_sample_treats_missing_rect_as_outside() {
        let mut spy = observed_spy(2);
        spy.sample(&rects(&[415.0, 900.0]), VIEWPORT);
        assert_eq!(spy.active(), Some("section-0-0"));
        assert_eq!(spy.sample(&[], VIEWPORT), None);
    }

    #[test]
    fn test_throttle() {
        let mut throttle = ScrollThrottle::new(100.0);
        assert!(throttle.ready(0.0));
        assert!(!throttle.ready(50.0));
        assert!(throttle.ready(100.0));
        assert!(!throttle.ready(199.0));
        assert!(throttle.ready(250.0));
    }
}
