//! Bounding volume hierarchy over an indexed triangle mesh.
//!
//! Flat array layout for GPU traversal:
//! - node 0 is the root, children of an interior node are adjacent
//! - leaves reference contiguous ranges of [`Bvh::triangle_order`]
//!
//! ## Pipeline
//! ```text
//! vertices + indices → centroids → (bounds, SAH split, partition)* → Bvh → GpuBvhData
//! ```

pub mod bounds;
pub mod build;
pub mod centroid;
pub mod config;
pub mod gpu_data;
pub mod split;
pub mod stats;

use std::ops::Range;

use crate::util::{Aabb, Result, Vec3};

pub use build::BvhBuilder;
pub use config::BuildConfig;
pub use gpu_data::{GpuBvhData, GpuBvhNode};
pub use split::Split;
pub use stats::BvhStats;

/// BVH node.
///
/// Interior node: `first_tri_or_child` = left child index, `tri_count` = 0
/// (right child is `first_tri_or_child + 1`).
/// Leaf node: `first_tri_or_child` = offset into the triangle order, `tri_count` > 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BvhNode {
    pub aabb: Aabb,
    pub first_tri_or_child: u32,
    pub tri_count: u32,
}

impl BvhNode {
    /// Leaf owning `range` of the triangle order.
    #[inline]
    pub fn leaf(aabb: Aabb, range: Range<usize>) -> Self {
        Self {
            aabb,
            first_tri_or_child: range.start as u32,
            tri_count: range.len() as u32,
        }
    }

    /// Interior node whose children start at `left_child`.
    #[inline]
    pub fn interior(aabb: Aabb, left_child: usize) -> Self {
        Self {
            aabb,
            first_tri_or_child: left_child as u32,
            tri_count: 0,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.tri_count > 0
    }

    /// Child node indices `(left, right)`, `None` for a leaf.
    #[inline]
    pub fn children(&self) -> Option<(usize, usize)> {
        if self.is_leaf() {
            None
        } else {
            let left = self.first_tri_or_child as usize;
            Some((left, left + 1))
        }
    }

    /// Range of the triangle order owned by this leaf (empty for interior nodes).
    #[inline]
    pub fn tri_range(&self) -> Range<usize> {
        if self.is_leaf() {
            let first = self.first_tri_or_child as usize;
            first..first + self.tri_count as usize
        } else {
            0..0
        }
    }
}

/// Built BVH.
#[derive(Debug, Clone, PartialEq)]
pub struct Bvh {
    /// Flat node array (index 0 = root), `nodes_used` long.
    pub nodes: Vec<BvhNode>,
    /// Permutation of triangle indices; leaves reference ranges of it.
    pub triangle_order: Vec<u32>,
}

impl Bvh {
    /// Build with the default [`BuildConfig`].
    pub fn build(vertices: &[Vec3], indices: &[u32]) -> Result<Self> {
        Self::build_with_config(vertices, indices, BuildConfig::default())
    }

    /// Build with explicit parameters.
    pub fn build_with_config(vertices: &[Vec3], indices: &[u32], config: BuildConfig) -> Result<Self> {
        Ok(BvhBuilder::new(vertices, indices, config)?.build())
    }

    #[inline]
    pub fn root(&self) -> &BvhNode {
        &self.nodes[0]
    }

    /// Bounds of the whole mesh.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.root().aabb
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangle_order.len()
    }

    /// Leaf nodes in array order.
    pub fn leaves(&self) -> impl Iterator<Item = &BvhNode> + '_ {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Source triangle indices owned by a leaf.
    pub fn leaf_triangles(&self, node: &BvhNode) -> &[u32] {
        &self.triangle_order[node.tri_range()]
    }
}

/// The three vertex positions of triangle `tri`.
#[inline]
pub(crate) fn triangle(vertices: &[Vec3], indices: &[u32], tri: usize) -> [Vec3; 3] {
    let base = tri * 3;
    [
        vertices[indices[base] as usize],
        vertices[indices[base + 1] as usize],
        vertices[indices[base + 2] as usize],
    ]
}
