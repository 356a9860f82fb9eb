//! Tree statistics and structural validation.

use super::bounds::bounds_of;
use super::Bvh;
use crate::util::{Error, Result, Vec3};

/// Summary of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BvhStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub interior_count: usize,
    /// Root has depth 0.
    pub max_depth: usize,
    pub max_leaf_size: usize,
    /// Sum over leaves of `tri_count * area(leaf) / area(root)`.
    pub sah_cost: f32,
}

impl Bvh {
    /// Walk the tree from the root and collect statistics.
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats {
            node_count: self.nodes.len(),
            ..Default::default()
        };
        if self.nodes.is_empty() {
            return stats;
        }

        let root_area = self.root().aabb.area();
        let mut stack = vec![(0usize, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            let node = &self.nodes[idx];
            stats.max_depth = stats.max_depth.max(depth);
            match node.children() {
                Some((left, right)) => {
                    stats.interior_count += 1;
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
                None => {
                    stats.leaf_count += 1;
                    stats.max_leaf_size = stats.max_leaf_size.max(node.tri_count as usize);
                    if root_area > 0.0 {
                        stats.sah_cost += node.tri_count as f32 * node.aabb.area() / root_area;
                    }
                }
            }
        }
        stats
    }

    /// Check every structural invariant against the mesh the tree was built from.
    ///
    /// - all nodes reachable from the root exactly once
    /// - leaf ranges disjoint and covering the whole triangle order
    /// - `triangle_order` is a permutation of `0..T`
    /// - parents contain children, leaves contain their triangles
    pub fn validate(&self, vertices: &[Vec3], indices: &[u32]) -> Result<()> {
        let tri_count = indices.len() / 3;
        if self.nodes.is_empty() || tri_count == 0 {
            return Err(Error::invalid_tree("no nodes or no triangles"));
        }
        if self.triangle_order.len() != tri_count {
            return Err(Error::invalid_tree(format!(
                "triangle order has {} entries for {} triangles",
                self.triangle_order.len(),
                tri_count
            )));
        }
        if self.nodes.len() > 2 * tri_count - 1 {
            return Err(Error::invalid_tree(format!(
                "{} nodes exceed 2T-1 = {}",
                self.nodes.len(),
                2 * tri_count - 1
            )));
        }

        let mut seen_tri = vec![false; tri_count];
        for &tri in &self.triangle_order {
            match seen_tri.get_mut(tri as usize) {
                Some(seen) if !*seen => *seen = true,
                Some(_) => return Err(Error::invalid_tree(format!("triangle {tri} listed twice"))),
                None => return Err(Error::invalid_tree(format!("triangle {tri} out of range"))),
            }
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut covered = vec![false; tri_count];
        let mut stack = vec![0usize];
        while let Some(idx) = stack.pop() {
            if std::mem::replace(&mut visited[idx], true) {
                return Err(Error::invalid_tree(format!("node {idx} reached twice")));
            }
            let node = &self.nodes[idx];

            if let Some((left, right)) = node.children() {
                if left == 0 || right >= self.nodes.len() {
                    return Err(Error::invalid_tree(format!(
                        "node {idx} has children {left}/{right} outside 1..{}",
                        self.nodes.len()
                    )));
                }
                for child in [left, right] {
                    if !node.aabb.contains(&self.nodes[child].aabb) {
                        return Err(Error::invalid_tree(format!(
                            "node {idx} does not contain child {child}"
                        )));
                    }
                    stack.push(child);
                }
                continue;
            }

            let range = node.tri_range();
            if range.end > tri_count {
                return Err(Error::invalid_tree(format!(
                    "leaf {idx} range {range:?} exceeds {tri_count} triangles"
                )));
            }
            for slot in range.clone() {
                if std::mem::replace(&mut covered[slot], true) {
                    return Err(Error::invalid_tree(format!(
                        "leaf {idx} overlaps another leaf at slot {slot}"
                    )));
                }
            }
            let tri_box = bounds_of(range, &self.triangle_order, indices, vertices);
            if !node.aabb.contains(&tri_box) {
                return Err(Error::invalid_tree(format!(
                    "leaf {idx} does not contain its triangles"
                )));
            }
        }

        if let Some(idx) = visited.iter().position(|v| !v) {
            return Err(Error::invalid_tree(format!("node {idx} unreachable")));
        }
        if let Some(slot) = covered.iter().position(|c| !c) {
            return Err(Error::invalid_tree(format!("slot {slot} not owned by any leaf")));
        }
        Ok(())
    }
}
