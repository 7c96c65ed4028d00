//! Web Mercator slippy-map tile math.

use std::f64::consts::PI;
use std::fmt;

/// Northernmost latitude representable in Web Mercator.
pub const MAX_LATITUDE: f64 = 85.051_128_78;
/// Southernmost latitude representable in Web Mercator.
pub const MIN_LATITUDE: f64 = -85.051_128_78;

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Slippy-map tile address.
///
/// `x` grows eastwards and `y` southwards; both are in `[0, 2^zoom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileIndex {
    #[must_use]
    pub fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Number of tiles along one axis at `zoom`.
fn tiles_per_axis(zoom: u8) -> f64 {
    2.0_f64.powi(i32::from(zoom))
}

/// Floor a fractional tile coordinate and keep it on the tile grid.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_tile_axis(value: f64, tiles: f64) -> u32 {
    value.floor().clamp(0.0, tiles - 1.0) as u32
}

/// Project a longitude/latitude pair onto the tile containing it.
///
/// Latitude is clamped to [`MIN_LATITUDE`, `MAX_LATITUDE`] first, so poles
/// land on the edge rows. Longitude is expected to already be normalized to
/// `[-180, 180]`; it is not wrapped. The floored result is kept inside
/// `[0, 2^zoom)`, so `lon = 180` maps to the last column.
#[must_use]
pub fn lon_lat_to_tile(lon: f64, lat: f64, zoom: u8) -> TileIndex {
    let tiles = tiles_per_axis(zoom);

    let x = (lon + 180.0) / 360.0 * tiles;

    let lat_rad = lat.clamp(MIN_LATITUDE, MAX_LATITUDE).to_radians();
    let n = (PI / 4.0 + lat_rad / 2.0).tan().ln();
    let y = (1.0 - n / PI) / 2.0 * tiles;

    TileIndex {
        zoom,
        x: to_tile_axis(x, tiles),
        y: to_tile_axis(y, tiles),
    }
}

/// North-west corner of a tile.
#[must_use]
pub fn tile_to_lon_lat(tile: &TileIndex) -> GeoCoordinate {
    let tiles = tiles_per_axis(tile.zoom);

    let longitude = f64::from(tile.x) / tiles * 360.0 - 180.0;
    let y = f64::from(tile.y) / tiles;
    let latitude = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();

    GeoCoordinate {
        latitude,
        longitude,
    }
}
