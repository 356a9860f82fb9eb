//! Build parameters.

use crate::util::{Error, Result};

/// Number of SAH candidate planes per axis.
pub const DEFAULT_BINS: usize = 100;
/// Accepted range for [`BuildConfig::bins`].
pub const MIN_BINS: usize = 8;
pub const MAX_BINS: usize = 128;

/// Nodes with fewer triangles than this are never split.
pub const DEFAULT_MIN_SPLIT_TRIS: u32 = 2;

/// Constructor-time parameters of a BVH build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Candidate split planes evaluated per axis.
    pub bins: usize,
    /// Smallest triangle count a node must have to be considered for a split.
    pub min_split_tris: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            min_split_tris: DEFAULT_MIN_SPLIT_TRIS,
        }
    }
}

impl BuildConfig {
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_min_split_tris(mut self, min_split_tris: u32) -> Self {
        self.min_split_tris = min_split_tris;
        self
    }

    /// Reject parameters the builder cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BINS..=MAX_BINS).contains(&self.bins) {
            return Err(Error::invalid_config(format!(
                "bins must be in {MIN_BINS}..={MAX_BINS}, got {}",
                self.bins
            )));
        }
        if self.min_split_tris < 2 {
            return Err(Error::invalid_config(format!(
                "min_split_tris must be at least 2, got {}",
                self.min_split_tris
            )));
        }
        Ok(())
    }
}
