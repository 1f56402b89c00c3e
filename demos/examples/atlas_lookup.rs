// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas lookup.
//!
//! Build both index kinds over the same packing and resolve a few quad centroids.
//!
//! Run:
//! - `cargo run -p understory_overlay_demos --example atlas_lookup`

use understory_atlas::{Atlas, IntervalIndex, QuadTree, SpatialSpriteIndex, SpriteId, SpriteRegion};

fn main() {
    // A 64 pixel atlas: two 32px sprites on top, four 16px sprites below, one malformed entry.
    let px = 1.0 / 64.0;
    let regions = [
        SpriteRegion::new(SpriteId(1), 0.0, 0.0, 32.0 * px, 32.0 * px),
        SpriteRegion::new(SpriteId(2), 32.0 * px, 0.0, 1.0, 32.0 * px),
        SpriteRegion::new(SpriteId(3), 0.0, 32.0 * px, 16.0 * px, 48.0 * px),
        SpriteRegion::new(SpriteId(4), 16.0 * px, 32.0 * px, 32.0 * px, 48.0 * px),
        SpriteRegion::new(SpriteId(5), 0.0, 48.0 * px, 16.0 * px, 1.0),
        SpriteRegion::new(SpriteId(6), 16.0 * px, 48.0 * px, 32.0 * px, 1.0),
        SpriteRegion::new(SpriteId(7), 48.0 * px, 48.0 * px, 80.0 * px, 1.0),
    ];

    let tree: Atlas<QuadTree> = Atlas::build(1, &regions);
    let flat: Atlas<IntervalIndex> = Atlas::build(1, &regions);
    println!("quadtree: {:?}", tree.index());
    println!("interval: {:?}", flat.index());
    println!("rejected: {}", tree.index().stats().rejected);

    let probes = [
        (16.0 * px, 16.0 * px),
        (48.0 * px, 16.0 * px),
        (24.0 * px, 40.0 * px),
        (8.0 * px, 56.0 * px),
        (56.0 * px, 56.0 * px),
    ];
    for (u, v) in probes {
        let a = tree.find(u, v);
        let b = flat.find(u, v);
        println!("({u:.3}, {v:.3}) -> quadtree {a:?}, interval {b:?}");
        assert_eq!(a, b, "both indexes agree on interior points");
    }
    assert!(!tree.contains(SpriteId(7)), "out-of-bounds sprite is skipped");
}
