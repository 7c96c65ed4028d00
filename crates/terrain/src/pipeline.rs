//! Place name to terrain mesh orchestration.

use image::RgbaImage;
use terrain_decode::{GeoCoordinate, MeshBuffers, TileIndex, build_mesh, lon_lat_to_tile};

use crate::cache::Cache;
use crate::client::Client;
use crate::error::Result;

/// Base colour used when no overlay image is available (linear RGBA gray).
pub const FALLBACK_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// Surface texture for the terrain.
#[derive(Debug, Clone)]
pub enum Overlay {
    /// Satellite image covering the tile.
    Image(RgbaImage),
    /// The overlay could not be fetched; render with a flat colour.
    Flat {
        color: [f32; 4],
        /// Why the image is missing.
        reason: String,
    },
}

impl Overlay {
    /// Whether the overlay fell back to a flat colour.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Flat { .. })
    }

    #[must_use]
    pub fn image(&self) -> Option<&RgbaImage> {
        match self {
            Self::Image(image) => Some(image),
            Self::Flat { .. } => None,
        }
    }
}

/// A finished terrain ready to present.
#[derive(Debug, Clone)]
pub struct Terrain {
    /// Resolved place name, or the query if the geocoder gave none.
    pub place: String,
    pub coordinate: GeoCoordinate,
    pub tile: TileIndex,
    pub mesh: MeshBuffers,
    pub overlay: Overlay,
    /// Lowest and highest elevation in meters.
    pub elevation_range: Option<(f32, f32)>,
}

/// Geocode, fetch and mesh in sequence.
pub struct TerrainPipeline<C: Cache> {
    client: Client<C>,
}

impl<C: Cache> TerrainPipeline<C> {
    #[must_use]
    pub fn new(client: Client<C>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &Client<C> {
        &self.client
    }

    /// Build the terrain for `place`.
    ///
    /// Fails when the place cannot be found or the elevation tile cannot be
    /// fetched. A missing overlay only degrades [`Terrain::overlay`] to
    /// [`Overlay::Flat`].
    pub async fn run(&self, place: &str) -> Result<Terrain> {
        let config = self.client.config();

        let feature = self.client.geocode(place).await.inspect_err(|e| {
            tracing::error!("Lookup for {place:?} failed: {e}");
        })?;
        let coordinate = feature.coordinate();
        let resolved = feature.place_name.unwrap_or_else(|| place.to_string());
        tracing::info!("Resolved {place:?} to {resolved} at {coordinate}");

        let tile = lon_lat_to_tile(coordinate.longitude, coordinate.latitude, config.zoom);
        tracing::info!("Fetching tile {tile}");

        // The two downloads are independent.
        let (elevation, overlay) = futures::future::join(
            self.client.fetch_elevation(&tile),
            self.client.fetch_overlay(&tile),
        )
        .await;

        let grid = elevation.inspect_err(|e| {
            tracing::error!("{e}");
        })?;

        let overlay = match overlay {
            Ok(image) => {
                tracing::info!(
                    "Loaded overlay {}x{}",
                    image.width(),
                    image.height()
                );
                Overlay::Image(image)
            }
            Err(e) => {
                tracing::warn!("Overlay for tile {tile} unavailable, using flat colour: {e}");
                Overlay::Flat {
                    color: FALLBACK_COLOR,
                    reason: e.to_string(),
                }
            }
        };

        let mesh = build_mesh(&grid, config.elevation_scale, grid.width(), grid.height());
        tracing::info!(
            "Built mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Terrain {
            place: resolved,
            coordinate,
            tile,
            mesh,
            overlay,
            elevation_range: grid.min_max(),
        })
    }
}
