//! Bounding boxes of triangle runs.

use std::ops::Range;

use super::triangle;
use crate::util::{Aabb, Vec3};

/// Bounds over all vertices of the triangles referenced by `permutation[range]`.
///
/// The range must not be empty: every node owns at least one triangle.
pub fn bounds_of(range: Range<usize>, permutation: &[u32], indices: &[u32], vertices: &[Vec3]) -> Aabb {
    debug_assert!(!range.is_empty(), "bounds requested for an empty triangle range");
    let mut aabb = Aabb::EMPTY;
    for &tri in &permutation[range] {
        for v in triangle(vertices, indices, tri as usize) {
            aabb.grow_point(v);
        }
    }
    aabb
}

/// Bounds of every triangle, in triangle order.
pub fn triangle_bounds(vertices: &[Vec3], indices: &[u32]) -> Vec<Aabb> {
    (0..indices.len() / 3)
        .map(|tri| {
            let [v0, v1, v2] = triangle(vertices, indices, tri);
            Aabb::from_triangle(v0, v1, v2)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<Vec3>, Vec<u32>) {
        let vertices = vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(6.0, 5.0, 5.0),
            Vec3::new(5.0, 7.0, 4.0),
        ];
        (vertices, vec![0, 1, 2, 3, 4, 5])
    }

    #[test]
    fn test_bounds_follow_permutation() {
        let (vertices, indices) = fixture();
        let perm = [1, 0];

        let b = bounds_of(0..1, &perm, &indices, &vertices);
        assert_eq!(b, Aabb::new(Vec3::new(5.0, 5.0, 4.0), Vec3::new(6.0, 7.0, 5.0)));

        let b = bounds_of(1..2, &perm, &indices, &vertices);
        assert_eq!(b, Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)));

        let all = bounds_of(0..2, &perm, &indices, &vertices);
        assert_eq!(all, Aabb::new(Vec3::ZERO, Vec3::new(6.0, 7.0, 5.0)));
    }

    #[test]
    fn test_triangle_bounds_union_matches() {
        let (vertices, indices) = fixture();
        let per_tri = triangle_bounds(&vertices, &indices);
        assert_eq!(per_tri.len(), 2);
        let union = per_tri[0].union(&per_tri[1]);
        assert_eq!(union, bounds_of(0..2, &[0, 1], &indices, &vertices));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_empty_range_is_a_bug() {
        let (vertices, indices) = fixture();
        bounds_of(1..1, &[0, 1], &indices, &vertices);
    }
}
