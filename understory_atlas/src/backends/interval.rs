// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order-based sprite index.
//!
//! Regions are kept sorted along u, together with a running maximum of their right edges.
//! A point query binary-searches for the regions that start at or before the point, then
//! walks backwards only while some earlier region can still reach the point.
//!
//! Containment is decided by [`compare_rects`], which treats two rectangles as located
//! together when they overlap in both axes.
//!
//! ## Cost
//!
//! The backward walk stops at the first region whose running reach ends before the query.
//! Packed atlases keep regions narrow, so the walk is short. A single wide region early in
//! u-order keeps the reach saturated for everything after it, and queries to its right then
//! scan back to that region: `O(n)` in the worst case. Prefer [`QuadTree`](crate::QuadTree)
//! for atlases with very wide sprites.
//!
//! ## Boundary points
//!
//! A point exactly on a sprite edge overlaps no sprite under [`compare_rects`]. In that
//! case the index falls back to the sprites whose closed rectangle contains the point and
//! returns the one with the smallest [`SpriteId`]. The same rule breaks ties when several
//! (overlapping) sprites strictly contain the point. The result is deterministic for a
//! given build, but callers should still query interior points.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::diagnostics::{BuildStats, accept_regions};
use crate::index::SpatialSpriteIndex;
use crate::options::BuildOptions;
use crate::types::{SpriteId, SpriteRegion, UvRect, max_t};

/// Compare two rectangles by position.
///
/// Returns [`Ordering::Less`] when `a` lies entirely before `b` along u, or (when they
/// overlap along u) entirely before `b` along v. [`Ordering::Greater`] is the mirror case.
/// [`Ordering::Equal`] means the rectangles overlap in both axes. Shared edges do not count
/// as overlap.
///
/// This is not a total order over arbitrary rectangles; it is only used to classify
/// candidates against a query, never to sort.
pub fn compare_rects(a: &UvRect, b: &UvRect) -> Ordering {
    if a.u1 <= b.u0 {
        return Ordering::Less;
    }
    if a.u0 >= b.u1 {
        return Ordering::Greater;
    }
    if a.v1 <= b.v0 {
        return Ordering::Less;
    }
    if a.v0 >= b.v1 {
        return Ordering::Greater;
    }
    Ordering::Equal
}

/// Sorted-interval index over a flat set of sprite regions.
pub struct IntervalIndex {
    entries: Vec<SpriteRegion>,
    // reach[i] = max(entries[..=i].u1)
    reach: Vec<f32>,
    stats: BuildStats,
}

impl IntervalIndex {
    fn pick(best: Option<SpriteId>, id: SpriteId) -> Option<SpriteId> {
        match best {
            Some(b) if b <= id => Some(b),
            _ => Some(id),
        }
    }
}

impl SpatialSpriteIndex for IntervalIndex {
    fn build_with(regions: &[SpriteRegion], options: &BuildOptions) -> Self {
        let (mut entries, rejects) = accept_regions(regions, options);
        entries.sort_by(|a, b| {
            a.u0.total_cmp(&b.u0)
                .then(a.v0.total_cmp(&b.v0))
                .then(a.id.cmp(&b.id))
        });
        let mut reach = Vec::with_capacity(entries.len());
        let mut acc = f32::NEG_INFINITY;
        for e in &entries {
            acc = max_t(acc, e.u1);
            reach.push(acc);
        }
        Self {
            entries,
            reach,
            stats: rejects.finish("interval index"),
        }
    }

    fn find(&self, u: f32, v: f32) -> Option<SpriteId> {
        if !u.is_finite() || !v.is_finite() {
            return None;
        }
        let point = UvRect::point(u, v);
        let end = self.entries.partition_point(|e| e.u0 <= u);

        let mut inside = None;
        let mut on_edge = None;
        for i in (0..end).rev() {
            if self.reach[i] < u {
                break;
            }
            let e = &self.entries[i];
            let rect = e.rect();
            match compare_rects(&point, &rect) {
                Ordering::Equal => inside = Self::pick(inside, e.id),
                _ if rect.contains_point(u, v) => on_edge = Self::pick(on_edge, e.id),
                _ => {}
            }
        }
        inside.or(on_edge)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> BuildStats {
        self.stats
    }
}

impl Debug for IntervalIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntervalIndex")
            .field("regions", &self.entries.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
