//! Serialize a built BVH into GPU storage buffers.

use bytemuck::{Pod, Zeroable};

use super::{Bvh, BvhNode};

/// GPU-friendly BVH node (32 bytes, matches WGSL struct).
///
/// Internal node: first_tri_or_child = left child index, tri_count = 0
/// Leaf node: first_tri_or_child = first slot in the triangle order, tri_count > 0
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuBvhNode {
    pub aabb_min: [f32; 3],
    pub first_tri_or_child: u32,
    pub aabb_max: [f32; 3],
    pub tri_count: u32,
}

impl From<&BvhNode> for GpuBvhNode {
    fn from(node: &BvhNode) -> Self {
        Self {
            aabb_min: node.aabb.min.to_array(),
            first_tri_or_child: node.first_tri_or_child,
            aabb_max: node.aabb.max.to_array(),
            tri_count: node.tri_count,
        }
    }
}

/// Node array and triangle order ready for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuBvhData {
    /// Flat BVH node array (bytemuck-castable).
    pub nodes: Vec<GpuBvhNode>,
    /// Final triangle permutation; leaf slot `i` is triangle `triangle_order[i]`.
    pub triangle_order: Vec<u32>,
}

impl GpuBvhData {
    /// Pack a built tree. No recomputation happens here.
    pub fn from_bvh(bvh: &Bvh) -> Self {
        Self {
            nodes: bvh.nodes.iter().map(GpuBvhNode::from).collect(),
            triangle_order: bvh.triangle_order.clone(),
        }
    }

    #[inline]
    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    #[inline]
    pub fn tri_count(&self) -> u32 {
        self.triangle_order.len() as u32
    }

    /// BVH nodes as bytes.
    pub fn nodes_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// Triangle order as bytes.
    pub fn triangle_order_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangle_order)
    }

    /// Index buffer rewritten in leaf order, for tracers that read triangles
    /// directly by slot instead of going through `triangle_order`.
    pub fn reordered_indices(&self, indices: &[u32]) -> Vec<u32> {
        let mut sorted = Vec::with_capacity(self.triangle_order.len() * 3);
        for &tri in &self.triangle_order {
            let base = tri as usize * 3;
            sorted.extend_from_slice(&indices[base..base + 3]);
        }
        sorted
    }
}

impl From<&Bvh> for GpuBvhData {
    fn from(bvh: &Bvh) -> Self {
        Self::from_bvh(bvh)
    }
}
