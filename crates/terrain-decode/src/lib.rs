//! Turn terrain-RGB elevation tiles into heightmap meshes.
//!
//! This crate provides pure synchronous functions for the math behind
//! terrain loading: mapping geographic coordinates to slippy-map tiles,
//! decoding packed-RGB elevation rasters, and synthesizing a triangle mesh
//! from an elevation grid. All functions are designed to be called from any
//! threading context - the library user controls parallelism.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **User-controlled parallelism**: Client decides how to parallelize
//! - **Web-compatible**: Compiles to WASM
//!
//! # Key functions
//!
//! - [`lon_lat_to_tile`]: Project a coordinate onto a Web Mercator tile
//! - [`decode_pixel`]: Decode one terrain-RGB pixel to meters
//! - [`ElevationGrid::from_rgba`]: Decode a whole elevation raster
//! - [`build_mesh`]: Build positions, UVs, indices and normals from a grid
//! - [`texture::decode_image`]: Decode PNG or JPEG tiles to RGBA
//! - [`obj::write_obj`]: Export a mesh as Wavefront OBJ

mod error;

pub mod elevation;
pub mod indices;
pub mod mesh;
pub mod normals;
pub mod obj;
pub mod texcoords;
pub mod texture;
pub mod tile;
pub mod vertices;

pub use elevation::{ElevationGrid, decode_pixel, decode_rgb8};
pub use error::{DecodeError, DecodeResult};
pub use indices::grid_indices;
pub use mesh::{MeshBuffers, build_mesh};
pub use normals::compute_normals;
pub use texcoords::grid_tex_coords;
pub use tile::{GeoCoordinate, MAX_LATITUDE, MIN_LATITUDE, TileIndex, lon_lat_to_tile, tile_to_lon_lat};
pub use vertices::grid_positions;
