//! Error types for BVH construction.

use thiserror::Error;

/// Main error type for scene flattening and BVH building.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Nothing to build over (no meshes, or zero triangles in total)
    #[error("Empty scene: no triangles to build a BVH over")]
    EmptyScene,

    /// Index buffer length is not a multiple of three
    #[error("Index count {len} is not a multiple of 3{}", mesh_suffix(.mesh))]
    InvalidIndexCount { mesh: Option<usize>, len: usize },

    /// Triangle references a vertex that does not exist
    #[error("Vertex index {index} out of range (vertex count: {vertex_count}){}", mesh_suffix(.mesh))]
    IndexOutOfRange {
        mesh: Option<usize>,
        index: u32,
        vertex_count: usize,
    },

    /// More elements than a `u32` index can address
    #[error("Scene too large: {count} {what} exceed the u32 index range")]
    SceneTooLarge { what: &'static str, count: usize },

    /// Build parameters rejected by `BuildConfig::validate`
    #[error("Invalid build config: {0}")]
    InvalidConfig(String),

    /// Structural check of a finished tree failed
    #[error("Invalid BVH: {0}")]
    InvalidTree(String),
}

fn mesh_suffix(mesh: &Option<usize>) -> String {
    match mesh {
        Some(i) => format!(" in mesh {i}"),
        None => String::new(),
    }
}

impl Error {
    /// Create an invalid tree error.
    pub fn invalid_tree(msg: impl Into<String>) -> Self {
        Self::InvalidTree(msg.into())
    }

    /// Create an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type alias for BVH operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Check that `indices` describes whole triangles over `vertex_count` vertices.
pub(crate) fn check_indices(indices: &[u32], vertex_count: usize, mesh: Option<usize>) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(Error::InvalidIndexCount { mesh, len: indices.len() });
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(Error::IndexOutOfRange { mesh, index, vertex_count });
    }
    Ok(())
}

/// Check that `count` elements can be addressed with `u32` indices.
pub(crate) fn check_u32_count(what: &'static str, count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| Error::SceneTooLarge { what, count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::EmptyScene;
        assert!(e.to_string().contains("no triangles"));

        let e = Error::IndexOutOfRange { mesh: Some(2), index: 9, vertex_count: 4 };
        let msg = e.to_string();
        assert!(msg.contains("9"));
        assert!(msg.contains("4"));
        assert!(msg.contains("mesh 2"));

        let e = Error::InvalidIndexCount { mesh: None, len: 7 };
        assert!(!e.to_string().contains("mesh"));
    }

    #[test]
    fn test_check_indices() {
        assert!(check_indices(&[0, 1, 2], 3, None).is_ok());
        assert_eq!(
            check_indices(&[0, 1], 3, None),
            Err(Error::InvalidIndexCount { mesh: None, len: 2 })
        );
        assert_eq!(
            check_indices(&[0, 1, 3], 3, Some(0)),
            Err(Error::IndexOutOfRange { mesh: Some(0), index: 3, vertex_count: 3 })
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_check_u32_count() {
        assert_eq!(check_u32_count("triangles", 12), Ok(12));
        assert_eq!(check_u32_count("vertices", u32::MAX as usize), Ok(u32::MAX));

        let over = u32::MAX as usize + 1;
        let err = check_u32_count("vertices", over).unwrap_err();
        assert_eq!(err, Error::SceneTooLarge { what: "vertices", count: over });
        assert!(err.to_string().contains("vertices"));
    }
}
