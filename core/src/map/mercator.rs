use crate::catalog::LatLng;

/// Web Mercator (EPSG:3857) pixel-space projection.
pub struct MercatorHelper;

impl MercatorHelper {
    pub const TILE_SIZE: f64 = 256.0;
    /// Latitudes beyond this fold onto the projection edge.
    pub const LAT_LIMIT: f64 = 85.05112878;

    /// World size in pixels at a zoom level.
    pub fn world_size(zoom: u8) -> f64 {
        Self::TILE_SIZE * f64::from(1u32 << u32::from(zoom))
    }

    /// Projects a coordinate to world pixel space at a zoom level.
    pub fn project(point: LatLng, zoom: u8) -> (f64, f64) {
        let size = Self::world_size(zoom);
        let lat = point.lat.clamp(-Self::LAT_LIMIT, Self::LAT_LIMIT);
        let sin = lat.to_radians().sin();

        let x = (point.lng + 180.0) / 360.0 * size;
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * std::f64::consts::PI)) * size;
        (x, y)
    }

    /// Inverse of [`MercatorHelper::project`].
    pub fn unproject(x: f64, y: f64, zoom: u8) -> LatLng {
        let size = Self::world_size(zoom);
        let lng = x / size * 360.0 - 180.0;
        let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::NZ_CENTRE;

    #[test]
    fn origin_projects_to_world_centre() {
        let (x, y) = MercatorHelper::project(LatLng::new(0.0, 0.0), 0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn project_unproject_round_trips() {
        let (x, y) = MercatorHelper::project(NZ_CENTRE, 5);
        let back = MercatorHelper::unproject(x, y, 5);
        assert!((back.lat - NZ_CENTRE.lat).abs() < 1e-9);
        assert!((back.lng - NZ_CENTRE.lng).abs() < 1e-9);
    }

    #[test]
    fn latitude_is_clamped_to_projection_limit() {
        let (_, y_pole) = MercatorHelper::project(LatLng::new(90.0, 0.0), 0);
        let (_, y_limit) = MercatorHelper::project(LatLng::new(MercatorHelper::LAT_LIMIT, 0.0), 0);
        assert!((y_pole - y_limit).abs() < 1e-9);
        assert!((y_limit - 0.0).abs() < 1e-6);
    }

    #[test]
    fn world_doubles_per_zoom_level() {
        assert_eq!(MercatorHelper::world_size(0), 256.0);
        assert_eq!(MercatorHelper::world_size(5), 8192.0);
    }
}
