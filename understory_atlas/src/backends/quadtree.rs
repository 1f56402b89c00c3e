// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad-tree sprite index.
//!
//! Every node splits its cell into four quadrants around a midpoint. A quadrant slot holds
//! nothing, a single sprite, or a child node. A sprite is stored in every quadrant its
//! rectangle extends into, so one sprite can appear in several leaves.
//!
//! Lookup descends along the query point only and never backtracks. It returns the first
//! sprite found on that path, which is correct for interior points of non-overlapping
//! sprites and keeps lookup logarithmic in the atlas size.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::diagnostics::{BuildStats, accept_regions};
use crate::index::SpatialSpriteIndex;
use crate::options::BuildOptions;
use crate::types::{SpriteId, SpriteRegion, lt};

/// Quad-tree index over the sprites of one atlas.
pub struct QuadTree {
    arena: Vec<Node>,
    regions: Vec<SpriteRegion>,
    epsilon: f32,
    max_depth: u32,
    stats: BuildStats,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Slot {
    Empty,
    Sprite(usize),
    Node(NodeIdx),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    mid_u: f32,
    mid_v: f32,
    radius: f32,
    depth: u32,
    // low-low, low-high, high-low, high-high (u first, then v)
    slots: [Slot; 4],
}

impl Node {
    fn new(mid_u: f32, mid_v: f32, radius: f32, depth: u32) -> Self {
        Self {
            mid_u,
            mid_v,
            radius,
            depth,
            slots: [Slot::Empty; 4],
        }
    }

    /// Quadrant for a query point. Points on the midpoint go high.
    fn quadrant_of(&self, u: f32, v: f32) -> usize {
        quadrant(!lt(u, self.mid_u), !lt(v, self.mid_v))
    }
}

const fn quadrant(high_u: bool, high_v: bool) -> usize {
    ((high_u as usize) << 1) | (high_v as usize)
}

const fn steps(quadrant: usize) -> (f32, f32) {
    let su = if quadrant & 0b10 != 0 { 1.0 } else { -1.0 };
    let sv = if quadrant & 0b01 != 0 { 1.0 } else { -1.0 };
    (su, sv)
}

impl QuadTree {
    /// Number of nodes in the tree, including the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Deepest node level below the root.
    pub fn depth(&self) -> u32 {
        self.arena.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    fn add(&mut self, node: NodeIdx, region: usize) {
        let r = self.regions[region];
        let n = &self.arena[node.get()];
        let eps = self.epsilon;

        // Touching the midpoint within epsilon does not count as crossing it.
        let low_u = r.u0 < n.mid_u - eps;
        let high_u = r.u1 > n.mid_u + eps;
        let low_v = r.v0 < n.mid_v - eps;
        let high_v = r.v1 > n.mid_v + eps;

        if low_u && low_v {
            self.add_inner(node, quadrant(false, false), region);
        }
        if low_u && high_v {
            self.add_inner(node, quadrant(false, true), region);
        }
        if high_u && low_v {
            self.add_inner(node, quadrant(true, false), region);
        }
        if high_u && high_v {
            self.add_inner(node, quadrant(true, true), region);
        }
    }

    fn add_inner(&mut self, node: NodeIdx, q: usize, region: usize) {
        match self.arena[node.get()].slots[q] {
            Slot::Empty => self.arena[node.get()].slots[q] = Slot::Sprite(region),
            Slot::Node(child) => self.add(child, region),
            Slot::Sprite(existing) => {
                let parent = &self.arena[node.get()];
                if parent.depth >= self.max_depth || self.overlaps(existing, region) {
                    // Splitting can never separate these two; the first one keeps the slot.
                    log::debug!(
                        "quad tree: sprite {:?} shadowed by {:?} at depth {}",
                        self.regions[region].id,
                        self.regions[existing].id,
                        parent.depth
                    );
                    return;
                }
                let (su, sv) = steps(q);
                let child = Node::new(
                    parent.mid_u + parent.radius * su,
                    parent.mid_v + parent.radius * sv,
                    parent.radius * 0.5,
                    parent.depth + 1,
                );
                let child_idx = NodeIdx(self.arena.len());
                self.arena.push(child);
                self.arena[node.get()].slots[q] = Slot::Node(child_idx);
                self.add(child_idx, existing);
                self.add(child_idx, region);
            }
        }
    }

    fn overlaps(&self, a: usize, b: usize) -> bool {
        let a = self.regions[a];
        let b = self.regions[b];
        let eps = self.epsilon;
        a.u0 < b.u1 - eps && b.u0 < a.u1 - eps && a.v0 < b.v1 - eps && b.v0 < a.v1 - eps
    }
}

impl SpatialSpriteIndex for QuadTree {
    fn build_with(regions: &[SpriteRegion], options: &BuildOptions) -> Self {
        let (regions, rejects) = accept_regions(regions, options);
        let mut tree = Self {
            // The root's quadrants are the four quarters of the atlas.
            arena: vec![Node::new(0.5, 0.5, 0.25, 0)],
            regions,
            epsilon: options.epsilon,
            max_depth: options.max_depth,
            stats: BuildStats::default(),
        };
        for i in 0..tree.regions.len() {
            tree.add(NodeIdx::ROOT, i);
        }
        tree.stats = rejects.finish("quad tree");
        tree
    }

    fn find(&self, u: f32, v: f32) -> Option<SpriteId> {
        let mut node = NodeIdx::ROOT;
        loop {
            let n = &self.arena[node.get()];
            match n.slots[n.quadrant_of(u, v)] {
                Slot::Empty => return None,
                Slot::Sprite(i) => return Some(self.regions[i].id),
                Slot::Node(child) => node = child,
            }
        }
    }

    fn len(&self) -> usize {
        self.regions.len()
    }

    fn stats(&self) -> BuildStats {
        self.stats
    }
}

impl Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("regions", &self.regions.len())
            .field("nodes", &self.arena.len())
            .field("depth", &self.depth())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: u32, u0: f32, v0: f32, u1: f32, v1: f32) -> SpriteRegion {
        SpriteRegion::new(SpriteId(id), u0, v0, u1, v1)
    }

    fn grid(n: u32) -> Vec<SpriteRegion> {
        let cell = 1.0 / n as f32;
        let mut out = Vec::new();
        for y in 0..n {
            for x in 0..n {
                let u0 = x as f32 * cell;
                let v0 = y as f32 * cell;
                out.push(region(y * n + x, u0, v0, u0 + cell, v0 + cell));
            }
        }
        out
    }

    #[test]
    fn two_sprite_atlas() {
        let tree = QuadTree::build(&[
            region(1, 0.0, 0.0, 0.5, 0.5),
            region(2, 0.5, 0.0, 1.0, 0.5),
        ]);
        assert_eq!(tree.find(0.25, 0.25), Some(SpriteId(1)));
        assert_eq!(tree.find(0.75, 0.25), Some(SpriteId(2)));
        assert_eq!(tree.find(0.75, 0.75), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn boundary_touching_regions_do_not_split_the_root() {
        let tree = QuadTree::build(&grid(2));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.find(0.1, 0.9), Some(SpriteId(2)));
    }

    #[test]
    fn every_interior_point_resolves_to_its_sprite_dyadic() {
        let regions = grid(16);
        let tree = QuadTree::build(&regions);
        for r in &regions {
            let du = (r.u1 - r.u0) * 0.01;
            let dv = (r.v1 - r.v0) * 0.01;
            let probes = [
                r.rect().center(),
                (r.u0 + du, r.v0 + dv),
                (r.u1 - du, r.v1 - dv),
                (r.u0 + du, r.v1 - dv),
            ];
            for (u, v) in probes {
                assert_eq!(tree.find(u, v), Some(r.id), "probe ({u}, {v}) in {r:?}");
            }
        }
    }

    #[test]
    fn every_center_resolves_non_dyadic() {
        let regions = grid(10);
        let tree = QuadTree::build(&regions);
        for r in &regions {
            let (u, v) = r.rect().center();
            assert_eq!(tree.find(u, v), Some(r.id), "center of {r:?}");
        }
    }

    #[test]
    fn lookup_is_idempotent() {
        let tree = QuadTree::build(&grid(8));
        let first = tree.find(0.3, 0.6);
        for _ in 0..10 {
            assert_eq!(tree.find(0.3, 0.6), first);
        }
        assert!(first.is_some());
    }

    #[test]
    fn region_straddling_center_is_found_in_every_quadrant() {
        let tree = QuadTree::build(&[
            region(7, 0.25, 0.25, 0.75, 0.75),
            region(8, 0.0, 0.0, 0.125, 0.125),
        ]);
        for (u, v) in [(0.3, 0.3), (0.7, 0.3), (0.3, 0.7), (0.7, 0.7)] {
            assert_eq!(tree.find(u, v), Some(SpriteId(7)));
        }
        assert_eq!(tree.find(0.05, 0.05), Some(SpriteId(8)));
    }

    #[test]
    fn malformed_regions_are_never_returned() {
        let eps = BuildOptions::EPSILON;
        let mut regions = vec![region(1, 0.0, 0.0, 0.5, 0.5)];
        for i in 0..12 {
            regions.push(region(100 + i, 0.5, 0.5, 1.0 + 2.0 * eps + 0.1, 1.0));
        }
        let tree = QuadTree::build(&regions);
        assert_eq!(tree.find(0.75, 0.75), None);
        assert_eq!(tree.find(0.25, 0.25), Some(SpriteId(1)));
        let stats = tree.stats();
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 12);
        assert_eq!(stats.reported, 5);
    }

    #[test]
    fn overlapping_regions_keep_the_first_and_terminate() {
        let tree = QuadTree::build(&[
            region(1, 0.0, 0.0, 1.0, 1.0),
            region(2, 0.0, 0.0, 1.0, 1.0),
        ]);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.find(0.4, 0.6), Some(SpriteId(1)));
    }

    #[test]
    fn empty_index_finds_nothing() {
        let tree = QuadTree::build(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.find(0.5, 0.5), None);
    }
}
