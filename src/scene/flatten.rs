//! Merge scene meshes into one world-space triangle soup.
//!
//! Bridges the scene layer's per-mesh buffers (local positions, local
//! indices, transform) to the single vertex + index array the BVH builder
//! consumes. Mesh order is preserved so callers can map triangles back to
//! their mesh through [`MeshRange`].

use rayon::prelude::*;

use super::mesh::{FlatScene, MeshInput, MeshRange};
use crate::util::{check_indices, check_u32_count, Aabb, Error, Result, Vec3};

/// Flatten `meshes` into global arrays.
///
/// Positions are transformed to world space; indices are offset by the
/// number of vertices of all preceding meshes.
#[tracing::instrument(skip_all, fields(mesh_count = meshes.len()))]
pub fn flatten_meshes(meshes: &[MeshInput]) -> Result<FlatScene> {
    if meshes.is_empty() {
        return Err(Error::EmptyScene);
    }
    for (i, mesh) in meshes.iter().enumerate() {
        check_indices(&mesh.indices, mesh.positions.len(), Some(i))?;
    }
    let tri_total: usize = meshes.iter().map(MeshInput::triangle_count).sum();
    if tri_total == 0 {
        return Err(Error::EmptyScene);
    }
    let vertex_total: usize = meshes.iter().map(|m| m.positions.len()).sum();
    // Offset indices and triangle ranges are stored as u32.
    check_u32_count("vertices", vertex_total)?;
    check_u32_count("triangles", tri_total)?;

    // Transform meshes in parallel (CPU-bound); collect keeps input order.
    let world: Vec<Vec<Vec3>> = meshes
        .par_iter()
        .map(|mesh| {
            mesh.positions
                .iter()
                .map(|&p| mesh.transform.transform_point3(p))
                .collect::<Vec<Vec3>>()
        })
        .collect();

    let mut scene = FlatScene {
        vertices: Vec::with_capacity(vertex_total),
        indices: Vec::with_capacity(tri_total * 3),
        meshes: Vec::with_capacity(meshes.len()),
    };

    for (mesh, positions) in meshes.iter().zip(world) {
        let first_vertex = scene.vertices.len() as u32;
        let first_triangle = scene.triangle_count() as u32;

        let mut bounds = Aabb::EMPTY;
        for &p in &positions {
            bounds.grow_point(p);
        }

        scene.vertices.extend(positions);
        scene.indices.extend(mesh.indices.iter().map(|&i| i + first_vertex));
        scene.meshes.push(MeshRange {
            first_triangle,
            triangle_count: mesh.triangle_count() as u32,
            first_vertex,
            vertex_count: mesh.positions.len() as u32,
            bounds,
        });
    }

    tracing::debug!(
        vertices = scene.vertex_count(),
        triangles = scene.triangle_count(),
        "scene flattened"
    );
    Ok(scene)
}
