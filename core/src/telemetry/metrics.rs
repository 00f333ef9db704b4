use std::sync::Mutex;

/// Point-in-time copy of the load counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSnapshot {
    pub sites_rendered: usize,
    pub images_requested: usize,
    pub images_loaded: usize,
    pub fetch_errors: usize,
}

/// Counters for catalog and plot-image loading over the page lifetime.
#[derive(Default)]
pub struct LoadMetrics {
    inner: Mutex<LoadSnapshot>,
}

impl LoadMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sites_rendered(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.sites_rendered = count;
        }
    }

    pub fn record_images_requested(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.images_requested += count;
        }
    }

    pub fn record_image_loaded(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.images_loaded += 1;
        }
    }

    pub fn record_fetch_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.fetch_errors += 1;
        }
    }

    pub fn snapshot(&self) -> LoadSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_across_batches() {
        let metrics = LoadMetrics::new();
        metrics.record_sites_rendered(12);
        metrics.record_images_requested(3);
        metrics.record_image_loaded();
        metrics.record_image_loaded();
        metrics.record_fetch_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.sites_rendered, 12);
        assert_eq!(snapshot.images_requested, 3);
        assert_eq!(snapshot.images_loaded, 2);
        assert_eq!(snapshot.fetch_errors, 1);
    }
}
