// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sprite index trait shared by every lookup strategy.

use core::fmt::Debug;

use crate::diagnostics::BuildStats;
use crate::options::BuildOptions;
use crate::types::{SpriteId, SpriteRegion};

/// Resolve a UV point to the sprite that owns it.
///
/// Indexes are built once from a full atlas packing and are read-only afterwards.
/// A repacked atlas gets a new index; nothing is updated in place.
///
/// Lookups expect an interior point (typically a quad's UV centroid). Points on a shared
/// sprite edge resolve according to each implementation's documented tie-break.
pub trait SpatialSpriteIndex: Debug {
    /// Build an index from a packing, skipping malformed regions.
    fn build_with(regions: &[SpriteRegion], options: &BuildOptions) -> Self
    where
        Self: Sized;

    /// Build an index with [`BuildOptions::default`].
    fn build(regions: &[SpriteRegion]) -> Self
    where
        Self: Sized,
    {
        Self::build_with(regions, &BuildOptions::default())
    }

    /// Find the sprite containing the point, if any.
    fn find(&self, u: f32, v: f32) -> Option<SpriteId>;

    /// Number of regions accepted into the index.
    fn len(&self) -> usize;

    /// Whether no region was accepted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Statistics recorded while building.
    fn stats(&self) -> BuildStats;
}
