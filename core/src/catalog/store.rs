use crate::catalog::site::SiteRecord;

/// Page-lifetime cache for the site catalog: filled once by the first
/// successful fetch and reused for every later render. Cleared only by
/// process restart, like the original page-reload lifecycle.
#[derive(Debug, Default)]
pub struct SiteStore {
    sites: Option<Vec<SiteRecord>>,
}

impl SiteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.sites.is_some()
    }

    /// Stores the catalog. The first fill wins; later fills are ignored.
    pub fn fill(&mut self, sites: Vec<SiteRecord>) -> &[SiteRecord] {
        if self.sites.is_none() {
            self.sites = Some(sites);
        }
        self.sites.as_deref().unwrap_or_default()
    }

    pub fn get(&self) -> Option<&[SiteRecord]> {
        self.sites.as_deref()
    }

    pub fn site(&self, index: usize) -> Option<&SiteRecord> {
        self.sites.as_deref().and_then(|sites| sites.get(index))
    }

    pub fn len(&self) -> usize {
        self.sites.as_deref().map_or(0, <[SiteRecord]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::site::LatLng;

    fn site(id: &str) -> SiteRecord {
        SiteRecord::new(id, Some("NZ".into()), id, LatLng::new(-41.0, 174.0))
    }

    #[test]
    fn first_fill_wins() {
        let mut store = SiteStore::new();
        assert!(!store.is_loaded());

        store.fill(vec![site("AUCK")]);
        assert!(store.is_loaded());
        assert_eq!(store.len(), 1);

        store.fill(vec![site("WGTN"), site("CHCH")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.site(0).unwrap().site_id, "AUCK");
    }

    #[test]
    fn get_exposes_cached_records() {
        let mut store = SiteStore::new();
        assert!(store.get().is_none());
        store.fill(vec![site("AUCK")]);
        assert_eq!(store.get().unwrap().len(), 1);
    }
}
