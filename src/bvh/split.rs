//! SAH binned split search.
//!
//! Candidate planes are spread evenly inside the node box on every axis with
//! a non-zero extent. A triangle lies left of a plane when its centroid is
//! strictly below the plane position, the same predicate the partition step
//! uses, so the evaluated counts are exactly the counts the split produces.

use crate::util::{Aabb, Vec3};

/// Chosen split plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    /// 0=x, 1=y, 2=z.
    pub axis: usize,
    pub position: f32,
    pub cost: f32,
}

/// Triangles whose centroids fall between two consecutive candidate planes.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    bounds: Aabb,
    count: usize,
}

impl Bucket {
    const EMPTY: Self = Self {
        bounds: Aabb::EMPTY,
        count: 0,
    };

    #[inline]
    fn add(&mut self, other: &Bucket) {
        self.bounds.grow(&other.bounds);
        self.count += other.count;
    }
}

/// SAH cost of splitting into two sides.
///
/// A cost of exactly zero only comes from flat boxes and is reported as
/// infinite so it never wins.
#[inline]
pub fn sah_cost(left_count: usize, left: &Aabb, right_count: usize, right: &Aabb) -> f32 {
    let cost = left_count as f32 * left.area() + right_count as f32 * right.area();
    if cost == 0.0 {
        f32::INFINITY
    } else {
        cost
    }
}

/// Cost of keeping `count` triangles in one leaf.
#[inline]
pub fn leaf_cost(count: usize, bounds: &Aabb) -> f32 {
    count as f32 * bounds.area()
}

/// Candidate plane positions on one axis, ascending.
pub fn candidate_positions(min: f32, extent: f32, bins: usize) -> impl Iterator<Item = f32> {
    let denom = (bins + 1) as f32;
    (0..bins).map(move |i| min + extent * ((i + 1) as f32 / denom))
}

/// Lowest-cost split of the triangles `tris`, or `None` when no candidate
/// leaves both sides non-empty with a finite cost.
///
/// Ties keep the first candidate found (x before y before z, lower planes first).
pub fn find_best_split(
    tris: &[u32],
    centroids: &[Vec3],
    tri_bounds: &[Aabb],
    node_bounds: &Aabb,
    bins: usize,
) -> Option<Split> {
    let mut best: Option<Split> = None;
    let extent = node_bounds.size();

    let mut positions = Vec::with_capacity(bins);
    let mut buckets = vec![Bucket::EMPTY; bins + 1];
    let mut right = vec![Bucket::EMPTY; bins];

    for axis in 0..3 {
        // Also rejects NaN extents.
        if !(extent[axis] > 0.0) {
            continue;
        }

        positions.clear();
        positions.extend(candidate_positions(node_bounds.min[axis], extent[axis], bins));

        // Bucket b holds centroids with exactly b planes at or below them,
        // so a triangle is left of plane i iff its bucket is <= i.
        buckets.fill(Bucket::EMPTY);
        for &tri in tris {
            let c = centroids[tri as usize][axis];
            let b = positions.partition_point(|&p| p <= c);
            buckets[b].bounds.grow(&tri_bounds[tri as usize]);
            buckets[b].count += 1;
        }

        // Sweep from right: right[i] = everything above plane i
        let mut sweep = Bucket::EMPTY;
        for i in (0..bins).rev() {
            sweep.add(&buckets[i + 1]);
            right[i] = sweep;
        }

        // Sweep from left and evaluate
        let mut sweep = Bucket::EMPTY;
        for i in 0..bins {
            sweep.add(&buckets[i]);
            if sweep.count == 0 || right[i].count == 0 {
                continue;
            }
            let cost = sah_cost(sweep.count, &sweep.bounds, right[i].count, &right[i].bounds);
            if cost < best.map_or(f32::INFINITY, |b| b.cost) {
                best = Some(Split {
                    axis,
                    position: positions[i],
                    cost,
                });
            }
        }
    }

    best
}
