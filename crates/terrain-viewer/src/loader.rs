//! Async terrain loading.
//!
//! Runs the terrain pipeline on a background task and spawns the resulting
//! mesh once it arrives.
//!
//! Uses platform-agnostic `async_channel` for communication between async tasks
//! and the main thread. The spawn mechanism differs by platform:
//! - Native: `bevy-tokio-tasks` for Tokio runtime (reqwest requires it)
//! - WASM: Bevy's built-in `AsyncComputeTaskPool` (reqwest uses browser fetch)

use std::sync::Arc;

#[cfg(target_family = "wasm")]
use bevy::tasks::AsyncComputeTaskPool;
use bevy::prelude::*;
#[cfg(not(target_family = "wasm"))]
use bevy_tokio_tasks::TokioTasksRuntime;

use terrain::{MemoryCache, Terrain, TerrainPipeline};

use crate::camera::{FlightCamera, framing_transform};
use crate::mesh::{to_bevy_mesh, to_material};
use crate::ui::{SearchState, SearchStatus};

type SearchResult = Result<Terrain, terrain::Error>;

/// Plugin for loading terrain.
pub struct TerrainLoaderPlugin;

impl Plugin for TerrainLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (start_pending_search, poll_search_task).chain());
    }
}

/// Pipeline plus the channel its background tasks report on.
#[derive(Resource)]
pub struct TerrainLoader {
    pipeline: Arc<TerrainPipeline<MemoryCache>>,
    result_rx: async_channel::Receiver<SearchResult>,
    result_tx: async_channel::Sender<SearchResult>,
}

impl TerrainLoader {
    pub fn new(pipeline: Arc<TerrainPipeline<MemoryCache>>) -> Self {
        let (result_tx, result_rx) = async_channel::bounded(1);
        Self {
            pipeline,
            result_rx,
            result_tx,
        }
    }
}

/// Marker for the spawned terrain entity.
#[derive(Component)]
pub struct TerrainTile;

/// Start the search queued by the UI, if any.
#[allow(clippy::needless_pass_by_value)]
fn start_pending_search(
    mut search: ResMut<SearchState>,
    loader: Res<TerrainLoader>,
    #[cfg(not(target_family = "wasm"))] runtime: ResMut<TokioTasksRuntime>,
) {
    if matches!(search.status, SearchStatus::Searching(_)) {
        return;
    }
    let Some(place) = search.pending.take() else {
        return;
    };

    let pipeline = Arc::clone(&loader.pipeline);
    let tx = loader.result_tx.clone();
    let query = place.clone();

    #[cfg(not(target_family = "wasm"))]
    {
        runtime.spawn_background_task(move |_ctx| async move {
            let result = pipeline.run(&query).await;
            let _ = tx.send(result).await;
        });
    }

    #[cfg(target_family = "wasm")]
    {
        AsyncComputeTaskPool::get()
            .spawn(async move {
                let result = pipeline.run(&query).await;
                let _ = tx.send(result).await;
            })
            .detach();
    }

    tracing::info!("Started loading terrain for {place:?}");
    search.status = SearchStatus::Searching(place);
}

/// Poll the search task and replace the terrain when it finishes.
#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
fn poll_search_task(
    mut commands: Commands,
    mut search: ResMut<SearchState>,
    loader: Res<TerrainLoader>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    existing: Query<Entity, With<TerrainTile>>,
    mut camera: Query<&mut Transform, With<FlightCamera>>,
) {
    let Ok(result) = loader.result_rx.try_recv() else {
        return;
    };

    let terrain = match result {
        Ok(terrain) => terrain,
        Err(e) => {
            tracing::error!("Failed to load terrain: {}", e);
            search.status = SearchStatus::Failed(e.to_string());
            return;
        }
    };

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let mesh = meshes.add(to_bevy_mesh(&terrain.mesh));
    let material = materials.add(to_material(&terrain.overlay, &mut images));
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        TerrainTile,
    ));

    if let Some((min, max)) = terrain.mesh.bounds() {
        for mut transform in &mut camera {
            *transform = framing_transform(min, max);
        }
    }

    tracing::info!(
        "Spawned terrain for {} at tile {}: {} triangles",
        terrain.place,
        terrain.tile,
        terrain.mesh.triangle_count()
    );

    search.status = SearchStatus::Loaded {
        place: terrain.place,
        tile: terrain.tile,
        elevation_range: terrain.elevation_range,
        degraded: match terrain.overlay {
            terrain::Overlay::Flat { reason, .. } => Some(reason),
            terrain::Overlay::Image(_) => None,
        },
    };
}
