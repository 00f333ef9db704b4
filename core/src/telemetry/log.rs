use log::{info, warn};

/// Client-event logging. Fetch failures are warnings and never surface to
/// the user; the page keeps whatever state it already has.
pub struct EventLog;

impl EventLog {
    pub fn catalog_loaded(count: usize) {
        info!("site catalog loaded: {} sites", count);
    }

    pub fn catalog_failed(error: &str) {
        warn!("site catalog fetch failed: {}", error);
    }

    pub fn site_selected(site_id: &str) {
        info!("site selected: {}", site_id);
    }

    pub fn plots_requested(site_id: &str, images: usize) {
        info!("plot batch for {}: {} images", site_id, images);
    }

    pub fn image_failed(url: &str, error: &str) {
        warn!("plot image failed {}: {}", url, error);
    }

    pub fn tile_failed(url: &str, error: &str) {
        warn!("tile fetch failed {}: {}", url, error);
    }
}
