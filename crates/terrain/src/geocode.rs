//! Forward geocoding responses.

use serde::Deserialize;
use terrain_decode::GeoCoordinate;

use crate::error::Result;

/// Geocoding response body. Only the fields we use are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub features: Vec<GeocodingFeature>,
}

/// One candidate match, best first.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingFeature {
    /// `[longitude, latitude]`.
    pub center: [f64; 2],
    /// Human readable name, e.g. "Paris, France".
    #[serde(default)]
    pub place_name: Option<String>,
}

impl GeocodingFeature {
    #[must_use]
    pub fn coordinate(&self) -> GeoCoordinate {
        let [longitude, latitude] = self.center;
        GeoCoordinate {
            latitude,
            longitude,
        }
    }
}

impl GeocodingResponse {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The best match, if any.
    #[must_use]
    pub fn best(&self) -> Option<&GeocodingFeature> {
        self.features.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn parses_first_feature() {
        let body = br#"{
            "type": "FeatureCollection",
            "query": ["everest"],
            "features": [
                {"id": "poi.1", "center": [86.925, 27.9881], "place_name": "Mount Everest"},
                {"id": "poi.2", "center": [1.0, 2.0]}
            ]
        }"#;

        let response = GeocodingResponse::from_slice(body).unwrap();
        assert_eq!(response.features.len(), 2);

        let best = response.best().unwrap();
        assert_eq!(best.place_name.as_deref(), Some("Mount Everest"));
        assert_eq!(best.coordinate(), GeoCoordinate::new(27.9881, 86.925));
        assert_eq!(response.features[1].place_name, None);
    }

    #[test]
    fn empty_or_missing_features() {
        let empty = GeocodingResponse::from_slice(br#"{"features": []}"#).unwrap();
        assert!(empty.best().is_none());

        let missing = GeocodingResponse::from_slice(br#"{"message": "Not Found"}"#).unwrap();
        assert!(missing.best().is_none());
    }

    #[test]
    fn malformed_json() {
        let err = GeocodingResponse::from_slice(b"{\"features\": [").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
