//! Search a place by name and fly over its terrain.

mod camera;
mod loader;
mod mesh;
mod ui;

use std::sync::Arc;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
#[cfg(not(target_family = "wasm"))]
use clap::Parser;
use terrain::{Client, ClientConfig, MemoryCache, TerrainPipeline};

use crate::camera::{CameraControllerPlugin, FlightCamera};
use crate::loader::{TerrainLoader, TerrainLoaderPlugin};
use crate::ui::{SearchState, SearchUiPlugin};

/// Command line settings.
#[derive(Debug, Clone)]
#[cfg_attr(not(target_family = "wasm"), derive(Parser))]
#[cfg_attr(not(target_family = "wasm"), command(about = "Terrain viewer"))]
struct Args {
    /// Access token for the tile and geocoding APIs.
    #[cfg_attr(
        not(target_family = "wasm"),
        arg(long, env = terrain::TOKEN_ENV_VAR, hide_env_values = true)
    )]
    token: String,

    /// Tile zoom level.
    #[cfg_attr(not(target_family = "wasm"), arg(long, default_value_t = terrain::DEFAULT_ZOOM))]
    zoom: u8,

    /// Multiplier from meters to mesh height.
    #[cfg_attr(
        not(target_family = "wasm"),
        arg(long, default_value_t = terrain::DEFAULT_ELEVATION_SCALE)
    )]
    elevation_scale: f32,

    /// Per-request timeout in seconds.
    #[cfg_attr(not(target_family = "wasm"), arg(long, default_value_t = 30))]
    timeout_secs: u64,

    /// Place to load on startup.
    #[cfg_attr(not(target_family = "wasm"), arg(long))]
    place: Option<String>,
}

impl Args {
    #[cfg(not(target_family = "wasm"))]
    fn load() -> Self {
        Self::parse()
    }

    /// The browser has no command line; the token is baked in at build time.
    #[cfg(target_family = "wasm")]
    fn load() -> Self {
        Self {
            token: option_env!("MAPBOX_ACCESS_TOKEN").unwrap_or_default().to_string(),
            zoom: terrain::DEFAULT_ZOOM,
            elevation_scale: terrain::DEFAULT_ELEVATION_SCALE,
            timeout_secs: 30,
            place: None,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
    #[cfg(not(target_family = "wasm"))]
    tracing_subscriber::fmt::init();

    let args = Args::load();
    let config = ClientConfig::new(args.token)
        .with_zoom(args.zoom)
        .with_elevation_scale(args.elevation_scale)
        .with_timeout(std::time::Duration::from_secs(args.timeout_secs));
    let pipeline = Arc::new(TerrainPipeline::new(Client::new(config, MemoryCache::new())?));

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Terrain Viewer".to_string(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin::default());

    #[cfg(not(target_family = "wasm"))]
    app.add_plugins(bevy_tokio_tasks::TokioTasksPlugin::default());

    app.insert_resource(TerrainLoader::new(pipeline))
        .insert_resource(SearchState::with_pending(args.place))
        .add_plugins((TerrainLoaderPlugin, SearchUiPlugin, CameraControllerPlugin))
        .add_systems(Startup, setup_scene)
        .run();

    Ok(())
}

/// Spawn the camera and sun.
fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(256.0, 300.0, 768.0).looking_at(Vec3::new(256.0, 0.0, 256.0), Vec3::Y),
        FlightCamera::default(),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 1.0, 0.0).looking_at(Vec3::new(-0.4, 0.0, -0.8), Vec3::Y),
    ));
}
