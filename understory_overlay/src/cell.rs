// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Publishing atlas snapshots across threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use understory_atlas::{Atlas, BuildOptions, QuadTree, SpatialSpriteIndex, SpriteRegion};

/// Holds the current [`Atlas`] snapshot.
///
/// Readers take a snapshot with [`load`](Self::load) once per geometry build and keep using it
/// even if a newer one is published meanwhile. Publishing swaps the pointer; it never mutates a
/// snapshot that a reader might hold.
pub struct AtlasCell<I = QuadTree> {
    current: RwLock<Arc<Atlas<I>>>,
    next_generation: AtomicU64,
}

impl<I: SpatialSpriteIndex> core::fmt::Debug for AtlasCell<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AtlasCell")
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl<I: SpatialSpriteIndex> AtlasCell<I> {
    /// Create a cell holding `atlas`.
    pub fn new(atlas: Atlas<I>) -> Self {
        let next = atlas.generation() + 1;
        Self {
            current: RwLock::new(Arc::new(atlas)),
            next_generation: AtomicU64::new(next),
        }
    }

    /// Create a cell holding an empty generation-0 atlas.
    pub fn empty() -> Self {
        Self::new(Atlas::build(0, &[]))
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<Atlas<I>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Generation of the current snapshot.
    pub fn generation(&self) -> u64 {
        self.load().generation()
    }

    /// Replace the current snapshot, returning the previous one.
    ///
    /// Snapshots with a generation older than the current one are still published, with a
    /// warning.
    pub fn publish(&self, atlas: Atlas<I>) -> Arc<Atlas<I>> {
        self.swap(Arc::new(atlas))
    }

    fn swap(&self, incoming: Arc<Atlas<I>>) -> Arc<Atlas<I>> {
        self.next_generation
            .fetch_max(incoming.generation() + 1, Ordering::Relaxed);
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if incoming.generation() < slot.generation() {
            log::warn!(
                "publishing atlas generation {} over newer generation {}",
                incoming.generation(),
                slot.generation()
            );
        }
        log::debug!(
            "atlas generation {} published ({} sprites)",
            incoming.generation(),
            incoming.len()
        );
        core::mem::replace(&mut *slot, incoming)
    }

    /// Build a snapshot from a fresh packing with the next generation number and publish it.
    ///
    /// The index is built before the lock is taken; readers are only blocked for the swap.
    /// When rebuilds overlap, a build that finishes after a newer generation was published is
    /// dropped, and the newer current snapshot is returned instead.
    pub fn rebuild(&self, regions: &[SpriteRegion], options: &BuildOptions) -> Arc<Atlas<I>> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let atlas = Arc::new(Atlas::build_with(generation, regions, options));
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if atlas.generation() < slot.generation() {
            log::debug!(
                "dropping stale atlas generation {}, generation {} is current",
                atlas.generation(),
                slot.generation()
            );
            return Arc::clone(&slot);
        }
        log::debug!(
            "atlas generation {} published ({} sprites)",
            atlas.generation(),
            atlas.len()
        );
        *slot = Arc::clone(&atlas);
        atlas
    }
}
