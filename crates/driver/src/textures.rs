//! The object-identity → GPU texture mapping shared across the driver.
//!
//! Entries are written while painting and removed by the per-tick garbage
//! collector; both happen on the render thread, so the concurrent container
//! is defensive rather than load-bearing. The one invariant that matters:
//! deleting a texture and dropping its cache entry happen in the same step,
//! so a stale key can never hand out a dead handle.

use dashmap::DashMap;
use lumen_core::{ObjectId, ObjectRef};

use crate::backend::TextureId;

/// Cache of GPU textures keyed by canvas-object identity.
pub struct TextureCache {
    entries: DashMap<ObjectId, TextureId>,
}

impl TextureCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Record the texture backing `object`.
    pub fn insert(&self, object: &ObjectRef, texture: TextureId) {
        self.entries.insert(ObjectId::of(object), texture);
    }

    /// The texture backing `object`, if one is cached.
    #[must_use]
    pub fn lookup(&self, object: &ObjectRef) -> Option<TextureId> {
        self.entries.get(&ObjectId::of(object)).map(|entry| *entry)
    }

    /// Remove `object`'s entry if it holds a valid handle, returning the
    /// handle so the caller can delete the GPU resource.
    ///
    /// An absent entry is a no-op: the object may never have been textured,
    /// or was already collected. An entry holding the reserved zero handle is
    /// left in place.
    #[must_use]
    pub fn evict_valid(&self, object: &ObjectRef) -> Option<TextureId> {
        self.entries
            .remove_if(&ObjectId::of(object), |_, texture| texture.is_valid())
            .map(|(_, texture)| texture)
    }

    /// Number of cached textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}
