//! Change-detecting BVH publisher.
//!
//! Per-frame callers hand over the current meshes; the cache rebuilds only
//! when the flattened scene differs from the last one it built, and swaps the
//! finished result in with a single write so readers never see a partial tree.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::flatten::flatten_meshes;
use super::mesh::{FlatScene, MeshInput};
use crate::bvh::{BuildConfig, Bvh, GpuBvhData};
use crate::util::{Error, Result};

/// Everything the tracer needs from one build.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBvh {
    pub scene: FlatScene,
    pub bvh: Bvh,
    pub gpu: GpuBvhData,
    /// Publish counter value this build was published under.
    pub generation: u64,
}

impl SceneBvh {
    /// Flatten and build without publishing anywhere.
    pub fn build(meshes: &[MeshInput], config: BuildConfig) -> Result<Self> {
        let scene = flatten_meshes(meshes)?;
        Self::from_scene(scene, config, 0)
    }

    fn from_scene(scene: FlatScene, config: BuildConfig, generation: u64) -> Result<Self> {
        let bvh = Bvh::build_with_config(&scene.vertices, &scene.indices, config)?;
        let gpu = GpuBvhData::from_bvh(&bvh);
        Ok(Self {
            scene,
            bvh,
            gpu,
            generation,
        })
    }
}

/// Thread-safe holder of the latest published [`SceneBvh`].
///
/// Uses `parking_lot` locks (non-poisoning). `update` calls are serialized;
/// readers only ever take the read lock long enough to clone an `Arc`.
pub struct SceneBvhCache {
    config: BuildConfig,
    current: RwLock<Option<Arc<SceneBvh>>>,
    /// Serializes updates so two builds never race to publish.
    update_lock: Mutex<()>,
    /// Forces the next update to rebuild even for an unchanged scene.
    dirty: AtomicBool,
    generation: AtomicU64,
}

impl SceneBvhCache {
    /// Create an empty cache. The config is validated on the first build.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            current: RwLock::new(None),
            update_lock: Mutex::new(()),
            dirty: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Rebuild if the scene changed since the last publish.
    ///
    /// Returns `Ok(true)` when a new tree was published, `Ok(false)` when the
    /// scene was identical and nothing happened. On error the previously
    /// published tree stays current.
    #[tracing::instrument(skip_all, fields(mesh_count = meshes.len()))]
    pub fn update(&self, meshes: &[MeshInput]) -> Result<bool> {
        let _guard = self.update_lock.lock();

        // Take the request now; an `invalidate` during the build stays pending.
        let forced = self.dirty.swap(false, Ordering::AcqRel);
        let restore = |err: Error| {
            if forced {
                self.dirty.store(true, Ordering::Release);
            }
            err
        };

        let scene = flatten_meshes(meshes).map_err(restore)?;

        if !forced {
            if let Some(current) = self.current() {
                if current.scene == scene {
                    tracing::trace!("scene unchanged, skipping rebuild");
                    return Ok(false);
                }
            }
        }

        let generation = self.generation.load(Ordering::Acquire) + 1;
        let built = SceneBvh::from_scene(scene, self.config, generation).map_err(restore)?;

        let mut current = self.current.write();
        self.generation.store(generation, Ordering::Release);
        *current = Some(Arc::new(built));
        drop(current);

        tracing::debug!(generation, "published new scene BVH");
        Ok(true)
    }

    /// Latest published build, if any.
    pub fn current(&self) -> Option<Arc<SceneBvh>> {
        self.current.read().clone()
    }

    /// Number of builds published so far; changes whenever geometry does.
    ///
    /// Bumped before the new tree is swapped in, so it may briefly run one
    /// ahead of `current()`. [`SceneBvh::generation`] is the value that
    /// belongs to a given snapshot.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Force the next `update` to rebuild.
    pub fn invalidate(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Drop the published tree and the cached scene image.
    pub fn clear(&self) {
        let _guard = self.update_lock.lock();
        *self.current.write() = None;
    }
}

impl Default for SceneBvhCache {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}
