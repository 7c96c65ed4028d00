//! HTTP client for geocoding and tile downloads.

use image::RgbaImage;
use reqwest::Url;
use terrain_decode::{ElevationGrid, TileIndex, texture::decode_image};

use crate::cache::Cache;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::geocode::{GeocodingFeature, GeocodingResponse};

#[cfg(not(target_family = "wasm"))]
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Async client for the geocoding and tile endpoints.
///
/// Every successful response body is stored in the cache under its URL, and
/// cached bodies are served without touching the network.
pub struct Client<C: Cache> {
    http: reqwest::Client,
    config: ClientConfig,
    cache: C,
}

impl<C: Cache> Client<C> {
    pub fn new(config: ClientConfig, cache: C) -> Result<Self> {
        #[cfg(not(target_family = "wasm"))]
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        #[cfg(target_family = "wasm")]
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            config,
            cache,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Append path segments and the access token to `base`.
    fn endpoint<'a>(&self, base: &str, segments: impl IntoIterator<Item = &'a str>) -> Result<String> {
        let mut url = Url::parse(base).map_err(|e| Error::Url(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::Url(format!("{base}: cannot append path")))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("access_token", &self.config.access_token);
        Ok(url.into())
    }

    /// URL of the forward geocoding query for `place`.
    pub fn geocoding_url(&self, place: &str) -> Result<String> {
        let query = format!("{place}.json");
        self.endpoint(&self.config.geocoding_base_url, [query.as_str()])
    }

    /// URL of the 512px terrain-RGB tile.
    pub fn elevation_url(&self, tile: &TileIndex) -> Result<String> {
        let (zoom, x) = (tile.zoom.to_string(), tile.x.to_string());
        let y = format!("{}@2x.pngraw", tile.y);
        self.endpoint(
            &self.config.elevation_base_url,
            [zoom.as_str(), x.as_str(), y.as_str()],
        )
    }

    /// URL of the satellite overlay tile.
    pub fn overlay_url(&self, tile: &TileIndex) -> Result<String> {
        let (zoom, x, y) = (tile.zoom.to_string(), tile.x.to_string(), tile.y.to_string());
        self.endpoint(
            &self.config.overlay_base_url,
            [zoom.as_str(), x.as_str(), y.as_str()],
        )
    }

    /// GET `url`, going through the cache.
    pub async fn fetch_bytes_from_url(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(bytes) = self.cache.get(url) {
            tracing::debug!("Cache hit for {}", redact(url));
            return Ok(bytes);
        }

        tracing::debug!("GET {}", redact(url));
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: redact(url).to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.without_url()))?
            .to_vec();
        self.cache.put(url.to_string(), bytes.clone());
        Ok(bytes)
    }

    /// Resolve `place` to its best geocoding match.
    ///
    /// An empty result set is [`Error::PlaceNotFound`]; any other failure is
    /// wrapped in [`Error::GeocodingFailed`].
    pub async fn geocode(&self, place: &str) -> Result<GeocodingFeature> {
        let lookup = async {
            let url = self.geocoding_url(place)?;
            let bytes = self.fetch_bytes_from_url(&url).await?;
            GeocodingResponse::from_slice(&bytes)
        };

        let response = lookup.await.map_err(|source| Error::GeocodingFailed {
            place: place.to_string(),
            source: Box::new(source),
        })?;

        response
            .features
            .into_iter()
            .next()
            .ok_or_else(|| Error::PlaceNotFound {
                place: place.to_string(),
            })
    }

    /// Download and decode the elevation tile.
    ///
    /// Any failure is wrapped in [`Error::ElevationUnavailable`].
    pub async fn fetch_elevation(&self, tile: &TileIndex) -> Result<ElevationGrid> {
        let fetch = async {
            let url = self.elevation_url(tile)?;
            let bytes = self.fetch_bytes_from_url(&url).await?;
            let image = decode_image(&bytes)?;
            Ok::<_, Error>(ElevationGrid::from_rgba(&image))
        };

        fetch.await.map_err(|source| Error::ElevationUnavailable {
            tile: *tile,
            source: Box::new(source),
        })
    }

    /// Download and decode the satellite overlay tile.
    pub async fn fetch_overlay(&self, tile: &TileIndex) -> Result<RgbaImage> {
        let url = self.overlay_url(tile)?;
        let bytes = self.fetch_bytes_from_url(&url).await?;
        Ok(decode_image(&bytes)?)
    }
}

/// Drop the query string so tokens stay out of logs and errors.
fn redact(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryCache, NoCache};
    use std::time::Duration;

    fn client() -> Client<MemoryCache> {
        Client::new(ClientConfig::new("pk.test123"), MemoryCache::new()).unwrap()
    }

    #[test]
    fn geocoding_url_escapes_place() {
        let client = client();
        assert_eq!(
            client.geocoding_url("New York").unwrap(),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/New%20York.json?access_token=pk.test123"
        );
        assert_eq!(
            client.geocoding_url("AC/DC").unwrap(),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/AC%2FDC.json?access_token=pk.test123"
        );
    }

    #[test]
    fn tile_urls() {
        let client = client();
        let tile = TileIndex::new(14, 12148, 6864);
        assert_eq!(
            client.elevation_url(&tile).unwrap(),
            "https://api.mapbox.com/v4/mapbox.terrain-rgb/14/12148/6864@2x.pngraw?access_token=pk.test123"
        );
        assert_eq!(
            client.overlay_url(&tile).unwrap(),
            "https://api.mapbox.com/styles/v1/mapbox/satellite-v9/tiles/512/14/12148/6864?access_token=pk.test123"
        );
    }

    #[test]
    fn custom_base_with_trailing_slash() {
        let config = ClientConfig::new("t").with_base_urls(
            "http://localhost:8080/geo/",
            "http://localhost:8080/dem",
            "http://localhost:8080/sat",
        );
        let client = Client::new(config, NoCache).unwrap();
        assert_eq!(
            client.geocoding_url("Oslo").unwrap(),
            "http://localhost:8080/geo/Oslo.json?access_token=t"
        );
        assert_eq!(
            client.elevation_url(&TileIndex::new(1, 0, 1)).unwrap(),
            "http://localhost:8080/dem/1/0/1@2x.pngraw?access_token=t"
        );
    }

    #[test]
    fn invalid_base_url() {
        let config = ClientConfig::new("t").with_base_urls("not a url", "x", "y");
        let client = Client::new(config, NoCache).unwrap();
        assert!(matches!(client.geocoding_url("Oslo"), Err(Error::Url(_))));
    }

    #[test]
    fn redact_strips_query() {
        assert_eq!(redact("https://a/b.json?access_token=secret"), "https://a/b.json");
        assert_eq!(redact("https://a/b.json"), "https://a/b.json");
    }

    #[tokio::test]
    async fn serves_from_cache() {
        let client = client();
        let url = client.geocoding_url("Nowhere").unwrap();
        client.cache().put(url.clone(), br#"{"features": []}"#.to_vec());

        assert_eq!(
            client.fetch_bytes_from_url(&url).await.unwrap(),
            br#"{"features": []}"#.to_vec()
        );

        let err = client.geocode("Nowhere").await.unwrap_err();
        assert!(matches!(err, Error::PlaceNotFound { ref place } if place == "Nowhere"));
    }

    #[tokio::test]
    async fn unreachable_elevation_is_wrapped() {
        let config = ClientConfig::new("t")
            .with_timeout(Duration::from_secs(2))
            .with_base_urls("http://127.0.0.1:9/g", "http://127.0.0.1:9/e", "http://127.0.0.1:9/o");
        let client = Client::new(config, NoCache).unwrap();
        let tile = TileIndex::new(2, 1, 1);

        let err = client.fetch_elevation(&tile).await.unwrap_err();
        assert!(matches!(err, Error::ElevationUnavailable { tile: t, .. } if t == tile));
        assert!(!err.to_string().contains("access_token"));
    }
}
