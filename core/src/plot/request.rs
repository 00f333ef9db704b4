use crate::catalog::SiteRecord;
use crate::plot::PlotKind;

/// Path prefix of the per-site plot image endpoint.
pub const PLOT_PATH_PREFIX: &str = "/data/gnss/plot";

/// Image path for one site and plot variable, network-scoped when the
/// site carries a network identifier.
pub fn plot_image_path(site_id: &str, code: &str, network_id: Option<&str>) -> String {
    match network_id {
        Some(network) if !network.is_empty() => {
            format!("{PLOT_PATH_PREFIX}/{site_id}/{code}/{network}")
        }
        _ => format!("{PLOT_PATH_PREFIX}/{site_id}/{code}"),
    }
}

/// Full image URLs for a site under the chosen plot family.
pub fn plot_image_urls(origin: &str, site: &SiteRecord, kind: PlotKind) -> Vec<String> {
    let origin = origin.trim_end_matches('/');
    kind.variable_codes()
        .iter()
        .map(|code| {
            format!(
                "{origin}{}",
                plot_image_path(&site.site_id, code, site.network_id.as_deref())
            )
        })
        .collect()
}

/// Caption shown above the plot panel.
pub fn plot_header_title(site_name: &str) -> String {
    format!("GNSS Time Series Plot - {site_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LatLng;

    fn auckland() -> SiteRecord {
        SiteRecord::new(
            "AUCK",
            Some("NZ".into()),
            "Auckland",
            LatLng::new(-36.6028, 174.8344),
        )
    }

    #[test]
    fn multipath_urls_for_a_networked_site() {
        let urls = plot_image_urls("https://www.geonet.org.nz", &auckland(), PlotKind::Multipath);
        assert_eq!(
            urls,
            [
                "https://www.geonet.org.nz/data/gnss/plot/AUCK/mp1/NZ",
                "https://www.geonet.org.nz/data/gnss/plot/AUCK/mp2/NZ",
            ]
        );
    }

    #[test]
    fn displacement_requests_one_url_per_component() {
        let urls = plot_image_urls("https://www.geonet.org.nz", &auckland(), PlotKind::Displacement);
        assert_eq!(urls.len(), 3);
        assert!(urls[0].ends_with("/AUCK/e/NZ"));
        assert!(urls[1].ends_with("/AUCK/n/NZ"));
        assert!(urls[2].ends_with("/AUCK/u/NZ"));
    }

    #[test]
    fn network_segment_is_omitted_when_unknown() {
        assert_eq!(plot_image_path("AUCK", "e", None), "/data/gnss/plot/AUCK/e");
        assert_eq!(plot_image_path("AUCK", "e", Some("")), "/data/gnss/plot/AUCK/e");
    }

    #[test]
    fn header_names_the_selected_site() {
        assert_eq!(
            plot_header_title("Auckland"),
            "GNSS Time Series Plot - Auckland"
        );
    }
}
