//! Error types for fetching and building terrain.

use terrain_decode::{DecodeError, TileIndex};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Which stage of the pipeline gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The place could not be resolved to a coordinate.
    Lookup,
    /// A required download or decode failed.
    Fetch,
}

/// Errors returned by the client and the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body not read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// A request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(String),

    /// A JSON body could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Geocoding returned no match.
    #[error("no place found for {place:?}")]
    PlaceNotFound { place: String },

    /// The geocoding request itself failed.
    #[error("geocoding {place:?} failed: {source}")]
    GeocodingFailed {
        place: String,
        #[source]
        source: Box<Error>,
    },

    /// The elevation tile could not be obtained.
    #[error("elevation tile {tile} unavailable: {source}")]
    ElevationUnavailable {
        tile: TileIndex,
        #[source]
        source: Box<Error>,
    },

    /// No access token was configured.
    #[error("no access token: set {0}")]
    MissingToken(&'static str),
}

impl Error {
    /// Classify the failure by pipeline stage.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::PlaceNotFound { .. } | Self::GeocodingFailed { .. } | Self::MissingToken(_) => {
                FailureKind::Lookup
            }
            _ => FailureKind::Fetch,
        }
    }
}
