use crate::workflow::config::JobConfig;
use gnsscore::catalog::SiteRecord;
use gnsscore::plot::{plot_header_title, plot_image_urls};
use serde::Serialize;

/// Image-URL manifest for one site.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub site_id: String,
    pub title: String,
    pub image_urls: Vec<String>,
}

/// Everything the viewer would request for a catalog under one plot family.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
    pub total_images: usize,
}

#[derive(Clone)]
pub struct ManifestRunner {
    config: JobConfig,
}

impl ManifestRunner {
    pub fn new(config: JobConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn execute(&self, sites: &[SiteRecord]) -> Manifest {
        let mut entries = Vec::new();
        let mut total_images = 0;

        for site in sites {
            if let Some(filter) = &self.config.sites {
                if !filter.iter().any(|id| id == &site.site_id) {
                    continue;
                }
            }
            let image_urls = plot_image_urls(&self.config.origin, site, self.config.plot_kind);
            total_images += image_urls.len();
            entries.push(ManifestEntry {
                site_id: site.site_id.clone(),
                title: plot_header_title(&site.name),
                image_urls,
            });
        }

        Manifest {
            entries,
            total_images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnsscore::catalog::LatLng;
    use gnsscore::plot::PlotKind;

    fn catalog() -> Vec<SiteRecord> {
        vec![
            SiteRecord::new(
                "AUCK",
                Some("NZ".into()),
                "Auckland",
                LatLng::new(-36.6028, 174.8344),
            ),
            SiteRecord::new(
                "WGTN",
                Some("NZ".into()),
                "Wellington",
                LatLng::new(-41.3236, 174.8056),
            ),
        ]
    }

    #[test]
    fn runner_builds_one_entry_per_site() {
        let config = JobConfig::from_plot_type("displacement").unwrap();
        let manifest = ManifestRunner::new(config).execute(&catalog());
        assert_eq!(manifest.entries.len(), 2);
        assert_eq!(manifest.total_images, 6);
        assert_eq!(manifest.entries[0].title, "GNSS Time Series Plot - Auckland");
    }

    #[test]
    fn site_filter_restricts_the_manifest() {
        let config = JobConfig {
            sites: Some(vec!["WGTN".into()]),
            plot_kind: PlotKind::Multipath,
            ..JobConfig::from_plot_type("multipath").unwrap()
        };
        let manifest = ManifestRunner::new(config).execute(&catalog());
        assert_eq!(manifest.entries.len(), 1);
        assert_eq!(manifest.entries[0].site_id, "WGTN");
        assert!(manifest.entries[0].image_urls[0].ends_with("/WGTN/mp1/NZ"));
        assert_eq!(manifest.total_images, 2);
    }
}
