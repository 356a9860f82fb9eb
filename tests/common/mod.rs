//! Shared geometry generators for integration tests.

#![allow(dead_code)]

use tribvh::prelude::*;
use tracing_subscriber::EnvFilter;

/// Route builder logs to the test output (`RUST_LOG=tribvh=debug`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic pseudo-random source (64-bit LCG).
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / (1u64 << 24) as f32
    }

    pub fn vec3(&mut self, scale: f32) -> Vec3 {
        Vec3::new(self.next_f32(), self.next_f32(), self.next_f32()) * scale
    }
}

/// `count` small random triangles scattered in a cube of side `extent`.
pub fn random_soup(count: usize, extent: f32, seed: u64) -> (Vec<Vec3>, Vec<u32>) {
    let mut rng = Lcg::new(seed);
    let mut vertices = Vec::with_capacity(count * 3);
    let mut indices = Vec::with_capacity(count * 3);
    for t in 0..count {
        let c = rng.vec3(extent);
        for _ in 0..3 {
            vertices.push(c + rng.vec3(1.0) - Vec3::splat(0.5));
        }
        let base = (t * 3) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    (vertices, indices)
}

/// Unit cube at `origin` as 8 shared vertices and 12 triangles (2 per face).
pub fn push_cube(vertices: &mut Vec<Vec3>, indices: &mut Vec<u32>, origin: Vec3) {
    let base = vertices.len() as u32;
    for i in 0..8u32 {
        let corner = Vec3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32);
        vertices.push(origin + corner);
    }
    const FACES: [[u32; 4]; 6] = [
        [0, 2, 6, 4], // -x
        [1, 5, 7, 3], // +x
        [0, 4, 5, 1], // -y
        [2, 3, 7, 6], // +y
        [0, 1, 3, 2], // -z
        [4, 6, 7, 5], // +z
    ];
    for [a, b, c, d] in FACES {
        indices.extend_from_slice(&[base + a, base + b, base + c, base + a, base + c, base + d]);
    }
}

/// `k`×`k`×`k` grid of unit cubes, one unit of empty space between neighbours.
pub fn cube_grid(k: usize) -> (Vec<Vec3>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for x in 0..k {
        for y in 0..k {
            for z in 0..k {
                let origin = Vec3::new(x as f32, y as f32, z as f32) * 2.0;
                push_cube(&mut vertices, &mut indices, origin);
            }
        }
    }
    (vertices, indices)
}

/// Depth of the deepest node (root = 0).
pub fn max_depth(bvh: &Bvh) -> usize {
    bvh.stats().max_depth
}
