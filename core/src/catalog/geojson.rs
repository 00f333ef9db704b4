use serde::Deserialize;

use crate::catalog::site::{LatLng, SiteRecord};
use crate::prelude::{WidgetError, WidgetResult};

/// GeoJSON feature collection as served by the site endpoint.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(rename = "siteID")]
    site_id: String,
    #[serde(rename = "networkID", default)]
    network_id: Option<String>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// Parses the site feature collection, keeping point features only.
/// Coordinates arrive longitude-first.
pub fn parse_site_collection(body: &str) -> WidgetResult<Vec<SiteRecord>> {
    let collection: FeatureCollection =
        serde_json::from_str(body).map_err(|err| WidgetError::InvalidCatalog(err.to_string()))?;

    let mut sites = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        if feature.geometry.kind != "Point" || feature.geometry.coordinates.len() < 2 {
            continue;
        }
        let lng = feature.geometry.coordinates[0];
        let lat = feature.geometry.coordinates[1];
        sites.push(SiteRecord {
            site_id: feature.properties.site_id,
            network_id: feature.properties.network_id,
            name: feature.properties.name,
            location: LatLng::new(lat, lng),
        });
    }
    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"siteID": "AUCK", "networkID": "NZ", "name": "Auckland"},
                "geometry": {"type": "Point", "coordinates": [174.8344, -36.6028]}
            },
            {
                "type": "Feature",
                "properties": {"siteID": "WGTN", "name": "Wellington"},
                "geometry": {"type": "Point", "coordinates": [174.8056, -41.3236]}
            }
        ]
    }"#;

    #[test]
    fn collection_of_n_features_yields_n_records() {
        let sites = parse_site_collection(BODY).unwrap();
        assert_eq!(sites.len(), 2);

        assert_eq!(sites[0].site_id, "AUCK");
        assert_eq!(sites[0].network_id.as_deref(), Some("NZ"));
        assert_eq!(sites[0].name, "Auckland");
        assert_eq!(sites[0].location, LatLng::new(-36.6028, 174.8344));

        assert_eq!(sites[1].site_id, "WGTN");
        assert_eq!(sites[1].network_id, None);
    }

    #[test]
    fn non_point_features_are_skipped() {
        let body = r#"{
            "features": [
                {
                    "properties": {"siteID": "AREA", "name": "Region"},
                    "geometry": {"type": "Polygon", "coordinates": []}
                },
                {
                    "properties": {"siteID": "AUCK", "name": "Auckland"},
                    "geometry": {"type": "Point", "coordinates": [174.8, -36.6]}
                }
            ]
        }"#;
        let sites = parse_site_collection(body).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].site_id, "AUCK");
    }

    #[test]
    fn malformed_body_is_an_invalid_catalog_error() {
        let err = parse_site_collection("not json").unwrap_err();
        assert!(matches!(err, WidgetError::InvalidCatalog(_)));
    }
}
