//! Utility types shared by the scene adapter and the BVH builder.
//!
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam

mod error;
mod math;

pub use error::*;
pub use math::*;
