//! Fetch the terrain for a place and save it to disk.
//!
//! This binary geocodes a place, downloads its elevation and overlay tiles,
//! builds the mesh and writes the raw rasters, a Wavefront OBJ and a JSON
//! summary to an output directory.
//!
//! Run: `cargo run -p terrain --features cli --bin fetch_terrain -- "Mount Fuji"`

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use terrain::{Client, ClientConfig, MemoryCache, Overlay, TOKEN_ENV_VAR, Terrain, TerrainPipeline};
use terrain_decode::{obj::write_obj, tile_to_lon_lat};

#[derive(Debug, Parser)]
#[command(about = "Build a terrain mesh for a place name")]
struct Args {
    /// Place to search for.
    place: String,

    /// Access token for the tile and geocoding APIs.
    #[arg(long, env = TOKEN_ENV_VAR, hide_env_values = true)]
    token: String,

    /// Tile zoom level.
    #[arg(long, default_value_t = terrain::DEFAULT_ZOOM)]
    zoom: u8,

    /// Multiplier from meters to mesh height.
    #[arg(long, default_value_t = terrain::DEFAULT_ELEVATION_SCALE)]
    elevation_scale: f32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Directory to write results into.
    #[arg(long, short, default_value = "terrain_out")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    fs::create_dir_all(&args.output)?;

    let config = ClientConfig::new(args.token)
        .with_zoom(args.zoom)
        .with_elevation_scale(args.elevation_scale)
        .with_timeout(std::time::Duration::from_secs(args.timeout_secs));
    let pipeline = TerrainPipeline::new(Client::new(config, MemoryCache::new())?);

    println!("Searching for {:?}...\n", args.place);
    let terrain = pipeline.run(&args.place).await?;
    println!("1. Resolved to {} ({})", terrain.place, terrain.coordinate);
    println!("   Tile {}", terrain.tile);

    // The pipeline cached the raw tiles, so saving them costs no requests.
    save_rasters(&pipeline, &terrain, &args.output).await?;
    save_mesh(&terrain, &args.output)?;
    save_summary(&terrain, &args.output)?;

    println!("\nSaved results to '{}/'", args.output.display());
    Ok(())
}

async fn save_rasters(
    pipeline: &TerrainPipeline<MemoryCache>,
    terrain: &Terrain,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = pipeline.client();

    println!("\n2. Saving rasters...");
    let elevation_bytes = client
        .fetch_bytes_from_url(&client.elevation_url(&terrain.tile)?)
        .await?;
    let elevation_path = output_path.join("elevation.png");
    File::create(&elevation_path)?.write_all(&elevation_bytes)?;
    println!(
        "   Saved {} bytes to {}",
        elevation_bytes.len(),
        elevation_path.display()
    );

    match terrain.overlay.image() {
        Some(image) => {
            let overlay_path = output_path.join("overlay.png");
            image.save(&overlay_path)?;
            println!(
                "   Saved {}x{} overlay to {}",
                image.width(),
                image.height(),
                overlay_path.display()
            );
        }
        None => println!("   No overlay available, mesh uses a flat colour"),
    }

    Ok(())
}

fn save_mesh(terrain: &Terrain, output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n3. Saving mesh...");
    let obj_path = output_path.join("terrain.obj");
    write_obj(&terrain.mesh, BufWriter::new(File::create(&obj_path)?))?;
    println!(
        "   {} vertices, {} triangles to {}",
        terrain.mesh.vertex_count(),
        terrain.mesh.triangle_count(),
        obj_path.display()
    );
    Ok(())
}

fn save_summary(terrain: &Terrain, output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let corner = tile_to_lon_lat(&terrain.tile);
    let bounds = terrain.mesh.bounds();
    let overlay = match &terrain.overlay {
        Overlay::Image(image) => serde_json::json!({ "width": image.width(), "height": image.height() }),
        Overlay::Flat { reason, .. } => serde_json::json!({ "fallback": reason }),
    };

    let summary = serde_json::json!({
        "place": terrain.place,
        "coordinate": [terrain.coordinate.longitude, terrain.coordinate.latitude],
        "tile": {
            "zoom": terrain.tile.zoom,
            "x": terrain.tile.x,
            "y": terrain.tile.y,
            "north_west": [corner.longitude, corner.latitude],
        },
        "elevation_range_m": terrain.elevation_range.map(|(lo, hi)| [lo, hi]),
        "vertex_count": terrain.mesh.vertex_count(),
        "triangle_count": terrain.mesh.triangle_count(),
        "bounds": bounds.map(|(min, max)| [min.to_array(), max.to_array()]),
        "overlay": overlay,
    });

    let summary_path = output_path.join("summary.json");
    File::create(&summary_path)?.write_all(serde_json::to_string_pretty(&summary)?.as_bytes())?;
    println!("\n4. Wrote summary to {}", summary_path.display());
    Ok(())
}
