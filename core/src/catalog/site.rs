use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One GNSS site from the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub site_id: String,
    pub network_id: Option<String>,
    pub name: String,
    pub location: LatLng,
}

impl SiteRecord {
    pub fn new(
        site_id: impl Into<String>,
        network_id: Option<String>,
        name: impl Into<String>,
        location: LatLng,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            network_id,
            name: name.into(),
            location,
        }
    }
}
