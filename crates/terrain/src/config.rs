//! Client configuration.

use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable read by [`ClientConfig::from_env`].
pub const TOKEN_ENV_VAR: &str = "MAPBOX_ACCESS_TOKEN";

/// Forward geocoding endpoint.
pub const GEOCODING_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";
/// Terrain-RGB raster tiles.
pub const ELEVATION_BASE_URL: &str = "https://api.mapbox.com/v4/mapbox.terrain-rgb";
/// 512px satellite style tiles.
pub const OVERLAY_BASE_URL: &str = "https://api.mapbox.com/styles/v1/mapbox/satellite-v9/tiles/512";

/// Zoom level used when none is given.
pub const DEFAULT_ZOOM: u8 = 14;
/// Meters to mesh units on the vertical axis.
pub const DEFAULT_ELEVATION_SCALE: f32 = 0.01;
/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the client and pipeline need, passed in explicitly.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Access token appended to every request.
    pub access_token: String,
    /// Tile zoom level.
    pub zoom: u8,
    /// Multiplier from meters to vertex height.
    pub elevation_scale: f32,
    /// Per-request timeout. Ignored on WASM where the browser owns timeouts.
    pub timeout: Duration,
    pub geocoding_base_url: String,
    pub elevation_base_url: String,
    pub overlay_base_url: String,
}

impl ClientConfig {
    /// Configuration with default endpoints and settings.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            zoom: DEFAULT_ZOOM,
            elevation_scale: DEFAULT_ELEVATION_SCALE,
            timeout: DEFAULT_TIMEOUT,
            geocoding_base_url: GEOCODING_BASE_URL.to_string(),
            elevation_base_url: ELEVATION_BASE_URL.to_string(),
            overlay_base_url: OVERLAY_BASE_URL.to_string(),
        }
    }

    /// Read the access token from [`TOKEN_ENV_VAR`].
    pub fn from_env() -> Result<Self> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            _ => Err(Error::MissingToken(TOKEN_ENV_VAR)),
        }
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_elevation_scale(mut self, elevation_scale: f32) -> Self {
        self.elevation_scale = elevation_scale;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the client at other servers, e.g. a local mirror.
    #[must_use]
    pub fn with_base_urls(
        mut self,
        geocoding: impl Into<String>,
        elevation: impl Into<String>,
        overlay: impl Into<String>,
    ) -> Self {
        self.geocoding_base_url = geocoding.into();
        self.elevation_base_url = elevation.into();
        self.overlay_base_url = overlay.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("pk.test");
        assert_eq!(config.access_token, "pk.test");
        assert_eq!(config.zoom, 14);
        assert!((config.elevation_scale - 0.01).abs() < f32::EPSILON);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.elevation_base_url, ELEVATION_BASE_URL);
    }

    #[test]
    fn builders() {
        let config = ClientConfig::new("t")
            .with_zoom(9)
            .with_elevation_scale(1.0)
            .with_timeout(Duration::from_secs(2))
            .with_base_urls("http://g", "http://e", "http://o");
        assert_eq!(config.zoom, 9);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.geocoding_base_url, "http://g");
        assert_eq!(config.elevation_base_url, "http://e");
        assert_eq!(config.overlay_base_url, "http://o");
    }
}
