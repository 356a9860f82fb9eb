//! SAH-based BVH builder.
//!
//! Constructs a flat BVH array from an indexed triangle mesh.
//! Uses the Surface Area Heuristic for split decisions and
//! produces a compact node array for GPU upload.

use std::ops::Range;

use super::bounds::{bounds_of, triangle_bounds};
use super::centroid::compute_centroids;
use super::split::{find_best_split, leaf_cost, Split};
use super::{Bvh, BvhNode, BuildConfig};
use crate::util::{check_indices, check_u32_count, Aabb, Error, Result, Vec3};

/// Pending node: its slot and the triangle range it owns.
struct Task {
    node_idx: usize,
    range: Range<usize>,
}

/// Single-use builder holding the working state of one build.
///
/// Every node owns a disjoint range of `triangle_order`; children get their
/// node slots reserved before they are processed.
pub struct BvhBuilder<'a> {
    vertices: &'a [Vec3],
    indices: &'a [u32],
    config: BuildConfig,
    centroids: Vec<Vec3>,
    tri_bounds: Vec<Aabb>,
    triangle_order: Vec<u32>,
    nodes: Vec<BvhNode>,
    nodes_used: usize,
}

impl<'a> BvhBuilder<'a> {
    /// Validate input and precompute per-triangle data.
    ///
    /// Fails with [`Error::EmptyScene`] before allocating anything when
    /// there are no triangles.
    pub fn new(vertices: &'a [Vec3], indices: &'a [u32], config: BuildConfig) -> Result<Self> {
        config.validate()?;
        if indices.len() < 3 {
            return Err(if indices.is_empty() {
                Error::EmptyScene
            } else {
                Error::InvalidIndexCount { mesh: None, len: indices.len() }
            });
        }
        check_indices(indices, vertices.len(), None)?;

        let tri_count = indices.len() / 3;
        // Child links and the triangle order are u32 on the GPU side.
        check_u32_count("nodes", 2 * tri_count - 1)?;
        Ok(Self {
            vertices,
            indices,
            config,
            centroids: compute_centroids(vertices, indices),
            tri_bounds: triangle_bounds(vertices, indices),
            triangle_order: (0..tri_count as u32).collect(),
            // Exact capacity: every split produces two non-empty children.
            nodes: vec![BvhNode::default(); 2 * tri_count - 1],
            nodes_used: 1,
        })
    }

    /// Run the build to completion.
    #[tracing::instrument(skip_all, fields(tri_count = self.triangle_order.len()))]
    pub fn build(mut self) -> Bvh {
        let tri_count = self.triangle_order.len();

        // Depth-first with an explicit stack so degenerate inputs cannot
        // exhaust the call stack.
        let mut stack = vec![Task {
            node_idx: 0,
            range: 0..tri_count,
        }];
        while let Some(task) = stack.pop() {
            if let Some((left, right)) = self.subdivide(task) {
                // Right first so left is processed first
                stack.push(right);
                stack.push(left);
            }
        }

        self.nodes.truncate(self.nodes_used);

        let root = self.nodes[0];
        if is_degenerate_root(&root) {
            tracing::warn!(
                tri_count,
                "degenerate geometry: zero-area bounds (coincident or colinear triangles), built a single leaf"
            );
        }

        let bvh = Bvh {
            nodes: self.nodes,
            triangle_order: self.triangle_order,
        };
        let stats = bvh.stats();
        tracing::debug!(
            nodes = stats.node_count,
            leaves = stats.leaf_count,
            max_depth = stats.max_depth,
            max_leaf_size = stats.max_leaf_size,
            sah_cost = stats.sah_cost,
            "BVH built"
        );
        bvh
    }

    /// Evaluate one node: either finalize it as a leaf or split it and
    /// return the two child tasks.
    fn subdivide(&mut self, task: Task) -> Option<(Task, Task)> {
        let Task { node_idx, range } = task;
        let count = range.len();
        let aabb = bounds_of(range.clone(), &self.triangle_order, self.indices, self.vertices);

        // Leaf unless a split is found below
        self.nodes[node_idx] = BvhNode::leaf(aabb, range.clone());

        if count < self.config.min_split_tris as usize {
            return None;
        }

        let split = find_best_split(
            &self.triangle_order[range.clone()],
            &self.centroids,
            &self.tri_bounds,
            &aabb,
            self.config.bins,
        )?;
        if split.cost >= leaf_cost(count, &aabb) {
            return None;
        }

        let mid = self.partition(range.clone(), &split);
        let left_count = mid - range.start;
        debug_assert!(left_count <= count);

        // Plane separated nothing (coplanar centroids)
        if left_count == 0 || left_count == count {
            return None;
        }

        let left_idx = self.nodes_used;
        self.nodes_used += 2;
        debug_assert!(self.nodes_used <= self.nodes.len(), "node capacity exceeded");

        self.nodes[node_idx] = BvhNode::interior(aabb, left_idx);

        Some((
            Task {
                node_idx: left_idx,
                range: range.start..mid,
            },
            Task {
                node_idx: left_idx + 1,
                range: mid..range.end,
            },
        ))
    }

    /// Two-pointer in-place partition of `range`. Triangles whose centroid
    /// lies below the split plane end up first; returns the split point.
    fn partition(&mut self, range: Range<usize>, split: &Split) -> usize {
        let centroids = &self.centroids;
        let order = &mut self.triangle_order;
        let is_left = |tri: u32| centroids[tri as usize][split.axis] < split.position;

        let mut lo = range.start;
        let mut hi = range.end; // exclusive
        loop {
            while lo < hi && is_left(order[lo]) {
                lo += 1;
            }
            while lo < hi && !is_left(order[hi - 1]) {
                hi -= 1;
            }
            if lo >= hi {
                break;
            }
            order.swap(lo, hi - 1);
            lo += 1;
            hi -= 1;
        }
        lo
    }
}

/// Several triangles stuck in one leaf because every box is flat.
fn is_degenerate_root(root: &BvhNode) -> bool {
    root.is_leaf() && root.tri_count > 1 && root.aabb.area() <= 0.0
}
