use crate::catalog::LatLng;
use crate::map::mercator::MercatorHelper;

/// Raster tile template for the GeoNet OSM tile set.
pub const TILE_URL_TEMPLATE: &str = "https://{s}.geonet.org.nz/osm/v2/{z}/{x}/{y}.png";

/// Subdomains rotated across tile requests.
pub const TILE_SUBDOMAINS: [&str; 5] = ["static1", "static2", "static3", "static4", "static5"];

/// Fallback image drawn in place of a tile whose request failed.
pub const ERROR_TILE_URL: &str = "https://static.geonet.org.nz/osm/images/logo_geonet.png";

/// Address of one raster tile in the slippy-map scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    /// Resolves the tile URL, rotating the subdomain the way the web
    /// client spreads requests.
    pub fn url(&self) -> String {
        let subdomain = TILE_SUBDOMAINS[(self.x + self.y) as usize % TILE_SUBDOMAINS.len()];
        TILE_URL_TEMPLATE
            .replace("{s}", subdomain)
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// Tiles covering a viewport centred on `centre` at `zoom`. Columns wrap
/// across the antimeridian; rows are clamped to the world range.
pub fn visible_tiles(centre: LatLng, zoom: u8, width: f32, height: f32) -> Vec<TileId> {
    let (cx, cy) = MercatorHelper::project(centre, zoom);
    let tile = MercatorHelper::TILE_SIZE;
    let columns = i64::from(1u32 << u32::from(zoom));

    let half_w = f64::from(width) / 2.0;
    let half_h = f64::from(height) / 2.0;
    let min_x = ((cx - half_w) / tile).floor() as i64;
    let max_x = ((cx + half_w) / tile).floor() as i64;
    let min_y = (((cy - half_h) / tile).floor() as i64).max(0);
    let max_y = (((cy + half_h) / tile).floor() as i64).min(columns - 1);

    let mut tiles = Vec::new();
    for ty in min_y..=max_y {
        for tx in min_x..=max_x {
            let id = TileId {
                zoom,
                x: tx.rem_euclid(columns) as u32,
                y: ty as u32,
            };
            if !tiles.contains(&id) {
                tiles.push(id);
            }
        }
    }
    tiles
}
