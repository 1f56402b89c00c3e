// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay stream.
//!
//! Feed a tessellated fluid surface through the streaming compositor, then repack the atlas
//! and do it again against the new snapshot.
//!
//! Run:
//! - `cargo run -p understory_overlay_demos --example overlay_stream`

use understory_atlas::{BuildOptions, SpriteId, SpriteRegion};
use understory_overlay::{
    AtlasCell, Light, OverlayDeclaration, OverlayRegistry, Rgba8, StreamingQuadCompositor,
    VertexCollector, VertexSink,
};

const WATER: SpriteId = SpriteId(10);
const FOAM: SpriteId = SpriteId(11);

/// Emit a `cells` x `cells` grid of quads over the sprite `[u0, v0]-[u1, v1]`.
fn tessellate(sink: &mut impl VertexSink, cells: u32, uv: [f32; 4]) {
    let [u0, v0, u1, v1] = uv;
    let step = 1.0 / cells as f32;
    for z in 0..cells {
        for x in 0..cells {
            let corners = [(x, z), (x + 1, z), (x + 1, z + 1), (x, z + 1)];
            for (cx, cz) in corners {
                let (fx, fz) = (cx as f32 * step, cz as f32 * step);
                sink.set_position([fx, 0.875, fz]);
                sink.set_color(Rgba8::new(63, 118, 228, 255));
                sink.set_uv([u0 + (u1 - u0) * fx, v0 + (v1 - v0) * fz]);
                sink.set_light(Light::new(0, 0xF0));
                sink.set_normal([0.0, 1.0, 0.0]);
                sink.end_vertex();
            }
        }
    }
}

fn draw(cell: &AtlasCell, overlays: &OverlayRegistry) -> usize {
    // One snapshot per build; a concurrent publish does not affect it.
    let atlas = cell.load();
    let water = atlas.region(WATER).unwrap();
    let mut comp = StreamingQuadCompositor::new(&*atlas, overlays, VertexCollector::new());
    tessellate(&mut comp, 4, [water.u0, water.v0, water.u1, water.v1]);
    println!(
        "generation {}: {} overlay quads",
        atlas.generation(),
        comp.emitted_quads()
    );
    comp.into_inner().into_vertices().len() / 4
}

fn main() {
    let overlays: OverlayRegistry = [(WATER, OverlayDeclaration::new(FOAM))]
        .into_iter()
        .collect();
    let cell: AtlasCell = AtlasCell::empty();

    // First packing: foam was not stitched, so nothing is drawn.
    let packing = [SpriteRegion::new(WATER, 0.0, 0.0, 0.5, 0.5)];
    let stitch = overlays.sprites_to_stitch(packing.iter().map(|r| r.id));
    println!("missing overlay sprites: {stitch:?}");
    cell.rebuild(&packing, &BuildOptions::default());
    assert_eq!(draw(&cell, &overlays), 0);

    // Repack with foam added.
    let packing = [
        SpriteRegion::new(WATER, 0.0, 0.0, 0.5, 0.5),
        SpriteRegion::new(FOAM, 0.5, 0.5, 1.0, 1.0),
    ];
    cell.rebuild(&packing, &BuildOptions::default());
    assert_eq!(draw(&cell, &overlays), 16);
}
