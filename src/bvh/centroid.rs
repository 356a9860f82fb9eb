//! Per-triangle centroid cache.

use crate::util::Vec3;

/// Mean vertex position of every triangle, in triangle order.
///
/// `indices` must hold whole triangles addressing `vertices`.
pub fn compute_centroids(vertices: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    indices
        .chunks_exact(3)
        .map(|t| {
            (vertices[t[0] as usize] + vertices[t[1] as usize] + vertices[t[2] as usize]) / 3.0
        })
        .collect()
}
