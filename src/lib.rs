//! # tribvh
//!
//! Surface Area Heuristic BVH builder for GPU ray tracing of triangle scenes.
//!
//! Given a flat triangle mesh (world-space vertex positions + index triples)
//! the builder produces a binary tree of axis-aligned boxes whose leaves
//! partition the triangles. The result is a flat node array plus a triangle
//! permutation, packed for upload to a GPU tracer.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (Aabb, errors, glam re-exports)
//! - [`bvh`] - Centroids, bounds, SAH split search, builder, GPU packing
//! - [`scene`] - Mesh flattening and the change-detecting publisher
//!
//! ## Example
//!
//! ```
//! use tribvh::prelude::*;
//!
//! let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(9.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), Vec3::new(9.0, 1.0, 0.0)];
//! let indices = [0, 1, 2, 3, 4, 5];
//!
//! let bvh = Bvh::build(&vertices, &indices)?;
//! assert_eq!(bvh.leaves().count(), 2);
//!
//! let gpu = GpuBvhData::from_bvh(&bvh);
//! assert_eq!(gpu.nodes_bytes().len(), bvh.node_count() * 32);
//! # Ok::<(), tribvh::Error>(())
//! ```

pub mod bvh;
pub mod scene;
pub mod util;

// Re-export commonly used types
pub use bvh::{BuildConfig, Bvh, BvhNode, GpuBvhData};
pub use util::{Aabb, Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bvh::{BuildConfig, Bvh, BvhBuilder, BvhNode, BvhStats, GpuBvhData, GpuBvhNode};
    pub use crate::scene::{flatten_meshes, FlatScene, MeshInput, MeshRange, SceneBvh, SceneBvhCache};
    pub use crate::util::{Aabb, Error, Mat4, Result, Vec3};
}
