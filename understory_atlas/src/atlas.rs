// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable atlas snapshot: sprite regions by id plus a spatial index over them.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;

use crate::backends::quadtree::QuadTree;
use crate::index::SpatialSpriteIndex;
use crate::options::BuildOptions;
use crate::types::{SpriteId, SpriteRegion};

/// One packing of an atlas.
///
/// An `Atlas` is built once from the packer's output and never mutated. When the atlas is
/// repacked, build a new snapshot with a higher generation and publish it in place of the
/// old one.
#[derive(Debug)]
pub struct Atlas<I = QuadTree> {
    generation: u64,
    regions: BTreeMap<SpriteId, SpriteRegion>,
    index: I,
}

impl<I: SpatialSpriteIndex> Atlas<I> {
    /// Build a snapshot with default options.
    pub fn build(generation: u64, regions: &[SpriteRegion]) -> Self {
        Self::build_with(generation, regions, &BuildOptions::default())
    }

    /// Build a snapshot.
    ///
    /// Malformed regions are left out of both the index and the id map. When the same id
    /// appears more than once, the first region wins.
    pub fn build_with(generation: u64, regions: &[SpriteRegion], options: &BuildOptions) -> Self {
        let index = I::build_with(regions, options);
        let mut by_id = BTreeMap::new();
        for r in regions {
            if r.validate(options.epsilon).is_err() {
                continue;
            }
            if let Entry::Vacant(slot) = by_id.entry(r.id) {
                slot.insert(*r);
            }
        }
        Self {
            generation,
            regions: by_id,
            index,
        }
    }

    /// Generation this snapshot was built for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sprite containing the point, if any.
    pub fn find(&self, u: f32, v: f32) -> Option<SpriteId> {
        self.index.find(u, v)
    }

    /// Region of the sprite containing the point, if any.
    pub fn find_region(&self, u: f32, v: f32) -> Option<SpriteRegion> {
        self.find(u, v).and_then(|id| self.region(id))
    }

    /// Region for a sprite id.
    pub fn region(&self, id: SpriteId) -> Option<SpriteRegion> {
        self.regions.get(&id).copied()
    }

    /// Whether the sprite was stitched into this atlas.
    pub fn contains(&self, id: SpriteId) -> bool {
        self.regions.contains_key(&id)
    }

    /// Ids of every sprite in this atlas, in ascending order.
    pub fn sprite_ids(&self) -> impl Iterator<Item = SpriteId> + '_ {
        self.regions.keys().copied()
    }

    /// Number of sprites in this atlas.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the atlas holds no sprites.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The spatial index.
    pub fn index(&self) -> &I {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::interval::IntervalIndex;

    fn regions() -> [SpriteRegion; 3] {
        [
            SpriteRegion::new(SpriteId(1), 0.0, 0.0, 0.5, 0.5),
            SpriteRegion::new(SpriteId(2), 0.5, 0.0, 1.0, 0.5),
            SpriteRegion::new(SpriteId(3), 0.0, 0.0, 2.0, 0.5),
        ]
    }

    #[test]
    fn snapshot_resolves_ids_and_regions() {
        let atlas: Atlas = Atlas::build(3, &regions());
        assert_eq!(atlas.generation(), 3);
        assert_eq!(atlas.len(), 2);
        assert!(!atlas.contains(SpriteId(3)));
        assert_eq!(atlas.find_region(0.75, 0.25), atlas.region(SpriteId(2)));
        assert_eq!(atlas.index().stats().rejected, 1);
    }

    #[test]
    fn both_indexes_agree() {
        let tree: Atlas = Atlas::build(1, &regions());
        let flat: Atlas<IntervalIndex> = Atlas::build(1, &regions());
        for (u, v) in [(0.25, 0.25), (0.75, 0.25), (0.5, 0.9)] {
            assert_eq!(tree.find(u, v), flat.find(u, v));
        }
    }

    #[test]
    fn first_duplicate_id_wins() {
        let atlas: Atlas = Atlas::build(
            1,
            &[
                SpriteRegion::new(SpriteId(5), 0.0, 0.0, 0.25, 0.25),
                SpriteRegion::new(SpriteId(5), 0.5, 0.5, 0.75, 0.75),
            ],
        );
        assert_eq!(atlas.region(SpriteId(5)).map(|r| r.u1), Some(0.25));
    }
}
