//! High-level async client that turns a place name into a terrain mesh.
//!
//! The [`TerrainPipeline`] geocodes a place, picks the slippy-map tile that
//! contains it, downloads the terrain-RGB elevation tile and a satellite
//! overlay, and hands the decoded grid to [`terrain_decode::build_mesh`].
//!
//! ```ignore
//! use terrain::{Client, ClientConfig, MemoryCache, TerrainPipeline};
//!
//! let config = ClientConfig::from_env()?.with_zoom(13);
//! let pipeline = TerrainPipeline::new(Client::new(config, MemoryCache::new())?);
//! let terrain = pipeline.run("Mount Fuji").await?;
//! println!("{} triangles", terrain.mesh.triangle_count());
//! ```

mod cache;
mod client;
mod config;
mod error;
mod geocode;
mod pipeline;

pub use cache::{Cache, MemoryCache, NoCache};
pub use client::Client;
pub use config::{
    ClientConfig, DEFAULT_ELEVATION_SCALE, DEFAULT_TIMEOUT, DEFAULT_ZOOM, ELEVATION_BASE_URL,
    GEOCODING_BASE_URL, OVERLAY_BASE_URL, TOKEN_ENV_VAR,
};
pub use error::{Error, FailureKind, Result};
pub use geocode::{GeocodingFeature, GeocodingResponse};
pub use pipeline::{FALLBACK_COLOR, Overlay, Terrain, TerrainPipeline};

pub use terrain_decode::{ElevationGrid, GeoCoordinate, MeshBuffers, TileIndex};
