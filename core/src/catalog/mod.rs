//! Site catalog supplied by the FITS site endpoint.

pub mod geojson;
pub mod site;
pub mod store;

pub use geojson::parse_site_collection;
pub use site::{LatLng, SiteRecord};
pub use store::SiteStore;

/// Query path for the GNSS site list (GAMIT east-component sites).
pub const SITES_ENDPOINT_PATH: &str = "/p/fits/site?typeID=e&methodID=gamit";

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "https://www.geonet.org.nz";

/// Full site-list URL on the given origin.
pub fn sites_endpoint(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), SITES_ENDPOINT_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_origin_and_path() {
        assert_eq!(
            sites_endpoint("https://www.geonet.org.nz/"),
            "https://www.geonet.org.nz/p/fits/site?typeID=e&methodID=gamit"
        );
    }
}
