// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_atlas --heading-base-level=0

//! Understory Atlas: resolve texture-atlas UV coordinates back to sprites.
//!
//! A packed atlas is a single texture holding many sprites, each addressed by a rectangle in
//! normalized UV space. Geometry that samples the atlas only carries UVs, so finding out
//! *which* sprite a quad uses means a spatial lookup. This crate provides that lookup.
//!
//! - [`SpriteRegion`] describes one sprite's rectangle; regions outside the unit square are
//!   skipped at build time with a rate-limited `log` diagnostic.
//! - [`SpatialSpriteIndex`] is the lookup interface, with two implementations:
//!   [`QuadTree`] (general purpose) and [`IntervalIndex`] (order-based).
//! - [`Atlas`] bundles an index with the id → region map and a generation number. It is an
//!   immutable snapshot; repacking produces a new one.
//!
//! # Example
//!
//! ```rust
//! use understory_atlas::{Atlas, SpriteId, SpriteRegion};
//!
//! let atlas: Atlas = Atlas::build(
//!     1,
//!     &[
//!         SpriteRegion::new(SpriteId(1), 0.0, 0.0, 0.5, 0.5),
//!         SpriteRegion::new(SpriteId(2), 0.5, 0.0, 1.0, 0.5),
//!     ],
//! );
//!
//! // Query the UV centroid of a quad.
//! assert_eq!(atlas.find(0.75, 0.25), Some(SpriteId(2)));
//! assert_eq!(atlas.find(0.75, 0.75), None);
//! ```
//!
//! ## Choosing an index
//!
//! - `QuadTree` (default for [`Atlas`]): descends one path from the root, O(depth) per lookup.
//!   Lookup is not exhaustive: it returns the first sprite stored on the query point's path,
//!   so it must be given interior points (such as a quad's UV centroid), never edge points.
//! - `IntervalIndex`: regions sorted along u with a running reach. Decides containment with
//!   [`compare_rects`] and breaks edge ties by smallest [`SpriteId`].
//!
//! ### Float semantics
//!
//! Regions with NaN or infinite coordinates are rejected at build time. Query points with
//! NaN coordinates never match in `IntervalIndex`; `QuadTree` sends them to the high quadrants.

#![no_std]

extern crate alloc;

pub mod atlas;
pub mod backends;
pub mod diagnostics;
pub mod error;
pub mod index;
pub mod options;
pub mod types;

pub use atlas::Atlas;
pub use backends::interval::{IntervalIndex, compare_rects};
pub use backends::quadtree::QuadTree;
pub use diagnostics::BuildStats;
pub use error::RegionError;
pub use index::SpatialSpriteIndex;
pub use options::BuildOptions;
pub use types::{SpriteId, SpriteRegion, UvRect};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_never_exceeds_report_cap() {
        let eps = BuildOptions::EPSILON;
        let mut regions = alloc::vec::Vec::new();
        for i in 0..50 {
            regions.push(SpriteRegion::new(SpriteId(i), 0.0, 0.0, 1.0 + 3.0 * eps, 0.5));
        }
        let tree = QuadTree::build(&regions);
        let flat = IntervalIndex::build(&regions);
        for stats in [tree.stats(), flat.stats()] {
            assert_eq!(stats.rejected, 50);
            assert_eq!(stats.reported, BuildOptions::MAX_REPORTED);
        }
        assert_eq!(tree.find(0.25, 0.25), None);
        assert_eq!(flat.find(0.25, 0.25), None);
    }

    #[test]
    fn custom_options_change_tolerance() {
        let region = SpriteRegion::new(SpriteId(1), 0.0, 0.0, 1.01, 0.5);
        let loose = BuildOptions {
            epsilon: 0.05,
            ..BuildOptions::default()
        };
        assert_eq!(QuadTree::build(&[region]).len(), 0);
        assert_eq!(QuadTree::build_with(&[region], &loose).len(), 1);
    }
}
