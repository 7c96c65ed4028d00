//! Conversion from terrain buffers to Bevy assets.

use bevy::asset::RenderAssetUsages;
use bevy::image::Image;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use terrain::{MeshBuffers, Overlay};

/// Upload-ready mesh with positions, normals, UVs and a `u32` index buffer.
pub fn to_bevy_mesh(buffers: &MeshBuffers) -> Mesh {
    let positions: Vec<[f32; 3]> = buffers.positions.iter().map(|p| p.to_array()).collect();
    let normals: Vec<[f32; 3]> = buffers.normals.iter().map(|n| n.to_array()).collect();
    let uvs: Vec<[f32; 2]> = buffers.uvs.iter().map(|uv| uv.to_array()).collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(buffers.indices.clone()))
}

/// Material for the terrain: the overlay image, or a flat colour.
pub fn to_material(overlay: &Overlay, images: &mut Assets<Image>) -> StandardMaterial {
    match overlay {
        Overlay::Image(rgba) => {
            let image = Image::from_dynamic(
                image::DynamicImage::ImageRgba8(rgba.clone()),
                true,
                RenderAssetUsages::RENDER_WORLD,
            );
            StandardMaterial {
                base_color_texture: Some(images.add(image)),
                perceptual_roughness: 1.0,
                ..default()
            }
        }
        Overlay::Flat { color, .. } => {
            let [r, g, b, a] = *color;
            StandardMaterial {
                base_color: Color::linear_rgba(r, g, b, a),
                perceptual_roughness: 1.0,
                ..default()
            }
        }
    }
}
