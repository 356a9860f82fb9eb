//! Mesh input and flattened scene types.

use crate::util::{Aabb, Mat4, Vec3};

/// One mesh as handed over by the scene layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInput {
    /// Local-space vertex positions.
    pub positions: Vec<Vec3>,
    /// Local triangle index triples.
    pub indices: Vec<u32>,
    /// Local-to-world transform.
    pub transform: Mat4,
}

impl MeshInput {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, transform: Mat4) -> Self {
        Self {
            positions,
            indices,
            transform,
        }
    }

    /// Mesh already in world space.
    pub fn world(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self::new(positions, indices, Mat4::IDENTITY)
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Where one input mesh landed in the flattened buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshRange {
    pub first_triangle: u32,
    pub triangle_count: u32,
    pub first_vertex: u32,
    pub vertex_count: u32,
    /// World-space bounds of the mesh vertices (empty for a vertex-less mesh).
    pub bounds: Aabb,
}

impl MeshRange {
    /// Global triangle indices belonging to this mesh.
    #[inline]
    pub fn triangles(&self) -> std::ops::Range<u32> {
        self.first_triangle..self.first_triangle + self.triangle_count
    }

    #[inline]
    pub fn contains_triangle(&self, tri: u32) -> bool {
        self.triangles().contains(&tri)
    }
}

/// All meshes merged into one world-space vertex array and one index array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatScene {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    /// One entry per input mesh, in input order.
    pub meshes: Vec<MeshRange>,
}

impl FlatScene {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Index of the mesh owning global triangle `tri`.
    pub fn mesh_of_triangle(&self, tri: u32) -> Option<usize> {
        // Ranges are contiguous and ascending.
        let idx = self.meshes.partition_point(|m| m.first_triangle + m.triangle_count <= tri);
        self.meshes
            .get(idx)
            .filter(|m| m.contains_triangle(tri))
            .map(|_| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(first: u32, count: u32) -> MeshRange {
        MeshRange {
            first_triangle: first,
            triangle_count: count,
            first_vertex: 0,
            vertex_count: 0,
            bounds: Aabb::EMPTY,
        }
    }

    #[test]
    fn test_mesh_of_triangle() {
        let scene = FlatScene {
            vertices: vec![],
            indices: vec![],
            meshes: vec![range(0, 2), range(2, 0), range(2, 3)],
        };
        assert_eq!(scene.mesh_of_triangle(0), Some(0));
        assert_eq!(scene.mesh_of_triangle(1), Some(0));
        assert_eq!(scene.mesh_of_triangle(2), Some(2));
        assert_eq!(scene.mesh_of_triangle(4), Some(2));
        assert_eq!(scene.mesh_of_triangle(5), None);
    }
}
