//! Web Mercator slippy-map math.
//!
//! World pixel space at zoom `z` is a square of `TILE_SIZE * 2^z` pixels,
//! origin top-left (lng -180, lat +85.05). Tiles are addressed `z/x/y`.

use crate::models::LatLng;

pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: u8 = 0;

/// Latitude where the Mercator square ends.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Side length of the world in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom.min(30))
}

/// Number of tiles per axis at `zoom`.
pub fn tile_count(zoom: u8) -> i64 {
    1i64 << zoom.min(30)
}

pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
}

/// Wrap longitude into [-180, 180).
pub fn wrap_longitude(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Project a coordinate to world pixels at `zoom`.
pub fn project(p: LatLng, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let x = (p.lng + 180.0) / 360.0 * size;
    let sin = clamp_latitude(p.lat).to_radians().sin();
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * std::f64::consts::PI)) * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: u8) -> LatLng {
    let size = world_size(zoom);
    let lng = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub z: u8,
    pub x: i64,
    pub y: i64,
}

/// A tile plus where its top-left corner lands in the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub coord: TileCoord,
    /// Unwrapped column; differs from `coord.x` on repeated world copies.
    pub column: i64,
    pub left: f64,
    pub top: f64,
}

/// Fill a `{s}/{z}/{x}/{y}` URL template. The subdomain rotates with the
/// tile position so neighbouring tiles spread across hosts.
pub fn tile_url(template: &str, subdomains: &[char], tile: TileCoord) -> String {
    let mut url = template
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string());
    if let Some(s) = subdomain_for(subdomains, tile) {
        url = url.replace("{s}", &s.to_string());
    }
    url
}

fn subdomain_for(subdomains: &[char], tile: TileCoord) -> Option<char> {
    if subdomains.is_empty() {
        return None;
    }
    let idx = (tile.x + tile.y).unsigned_abs() as usize % subdomains.len();
    Some(subdomains[idx])
}

/// Tiles covering a `width`×`height` container whose top-left corner sits at
/// world pixel `origin`. Columns wrap around the antimeridian; rows outside
/// the world are skipped.
pub fn visible_tiles(origin: (f64, f64), zoom: u8, width: f64, height: f64) -> Vec<PlacedTile> {
    if width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let n = tile_count(zoom);
    let first_col = (origin.0 / TILE_SIZE).floor() as i64;
    let last_col = ((origin.0 + width) / TILE_SIZE).floor() as i64;
    let first_row = ((origin.1 / TILE_SIZE).floor() as i64).max(0);
    let last_row = (((origin.1 + height) / TILE_SIZE).floor() as i64).min(n - 1);

    let mut tiles = Vec::new();
    for row in first_row..=last_row {
        for col in first_col..=last_col {
            tiles.push(PlacedTile {
                coord: TileCoord {
                    z: zoom,
                    x: col.rem_euclid(n),
                    y: row,
                },
                column: col,
                left: col as f64 * TILE_SIZE - origin.0,
                top: row as f64 * TILE_SIZE - origin.1,
            });
        }
    }
    tiles
}
