//! Scene-side glue around the builder.
//!
//! - [`flatten_meshes`] - merge transformed meshes into one triangle soup
//! - [`SceneBvhCache`] - rebuild on change, publish atomically

pub mod cache;
pub mod flatten;
pub mod mesh;

pub use cache::{SceneBvh, SceneBvhCache};
pub use flatten::flatten_meshes;
pub use mesh::{FlatScene, MeshInput, MeshRange};
