/// Viewports narrower than this get scrolled to the plot panel once all
/// images have arrived.
pub const NARROW_VIEWPORT_PX: f32 = 992.0;

/// Counts image completions for the current plot batch.
///
/// Batches are generation-tagged: selecting another site or switching the
/// plot family starts a new generation, and completions from an older one
/// are discarded instead of inflating the counter.
#[derive(Debug, Default)]
pub struct PlotLoadTracker {
    generation: u64,
    expected: usize,
    loaded: usize,
}

impl PlotLoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a new batch, returning its generation tag.
    pub fn begin(&mut self, expected: usize) -> u64 {
        self.generation += 1;
        self.expected = expected;
        self.loaded = 0;
        self.generation
    }

    /// Records one completed image, returning whether it was counted.
    /// Completions tagged with a stale generation are dropped.
    pub fn record_loaded(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.expected == 0 {
            return false;
        }
        if self.loaded < self.expected {
            self.loaded += 1;
        }
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    /// True once every image in the current batch has loaded.
    pub fn all_loaded(&self) -> bool {
        self.expected > 0 && self.loaded >= self.expected
    }

    /// The auto-scroll to the plot panel fires only on narrow viewports,
    /// where the panels stack instead of sitting side by side.
    pub fn should_scroll(&self, viewport_width: f32) -> bool {
        self.all_loaded() && viewport_width < NARROW_VIEWPORT_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_completes_after_expected_loads() {
        let mut tracker = PlotLoadTracker::new();
        let generation = tracker.begin(3);

        assert!(!tracker.all_loaded());
        assert!(tracker.record_loaded(generation));
        assert!(tracker.record_loaded(generation));
        assert!(!tracker.all_loaded());
        assert!(tracker.record_loaded(generation));
        assert!(tracker.all_loaded());
    }

    #[test]
    fn stale_generation_completions_are_dropped() {
        let mut tracker = PlotLoadTracker::new();
        let first = tracker.begin(2);
        assert!(tracker.record_loaded(first));

        let second = tracker.begin(2);
        assert!(!tracker.record_loaded(first));
        assert_eq!(tracker.loaded(), 0);

        assert!(tracker.record_loaded(second));
        assert!(tracker.record_loaded(second));
        assert!(tracker.all_loaded());
    }

    #[test]
    fn scroll_fires_only_on_narrow_viewports() {
        let mut tracker = PlotLoadTracker::new();
        let generation = tracker.begin(1);
        tracker.record_loaded(generation);

        assert!(tracker.should_scroll(640.0));
        assert!(!tracker.should_scroll(NARROW_VIEWPORT_PX));
        assert!(!tracker.should_scroll(1280.0));
    }

    #[test]
    fn empty_tracker_never_scrolls() {
        let tracker = PlotLoadTracker::new();
        assert!(!tracker.all_loaded());
        assert!(!tracker.should_scroll(640.0));
    }
}
