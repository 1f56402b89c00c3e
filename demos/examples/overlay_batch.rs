// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay batch.
//!
//! Synthesize overlay quads for a baked cube and route them to render passes.
//!
//! Run:
//! - `cargo run -p understory_overlay_demos --example overlay_batch`

use understory_atlas::{Atlas, SpriteId, SpriteRegion};
use understory_overlay::{
    BlendMode, Face, Light, OverlayDeclaration, OverlayRegistry, Quad,
    QuadOverlayResolver, RenderContext, TransparencyMode, Vertex,
};

const STONE: SpriteId = SpriteId(1);
const GRASS: SpriteId = SpriteId(2);
const ORE_GLOW: SpriteId = SpriteId(3);
const MOSS: SpriteId = SpriteId(4);

fn face_quad(face: Face, sprite: &SpriteRegion) -> Quad {
    let uvs = [
        [sprite.u0, sprite.v0],
        [sprite.u1, sprite.v0],
        [sprite.u1, sprite.v1],
        [sprite.u0, sprite.v1],
    ];
    let step = face.step().map(f32::from);
    let vertices = core::array::from_fn(|i| {
        Vertex::new([step[0] * 0.5, step[1] * 0.5, step[2] * 0.5], uvs[i])
            .with_light(Light::new(48, 96))
    });
    Quad::new(vertices, face, sprite.id)
}

fn main() {
    let regions = [
        SpriteRegion::new(STONE, 0.0, 0.0, 0.25, 0.25),
        SpriteRegion::new(GRASS, 0.25, 0.0, 0.5, 0.25),
        SpriteRegion::new(ORE_GLOW, 0.5, 0.0, 0.75, 0.25),
        SpriteRegion::new(MOSS, 0.75, 0.0, 1.0, 0.25),
    ];
    let atlas: Atlas = Atlas::build(1, &regions);

    let mut overlays = OverlayRegistry::new();
    overlays.insert(STONE, OverlayDeclaration::new(ORE_GLOW).emissive(true));
    overlays.insert(
        GRASS,
        OverlayDeclaration::new(MOSS).transparency(TransparencyMode::Translucent),
    );
    println!(
        "needs stitching: {:?}",
        overlays.sprites_to_stitch([STONE, GRASS])
    );

    // Stone on the sides, grass on top, nothing on the bottom.
    let mut quads = Vec::new();
    for face in Face::ALL {
        let sprite = match face {
            Face::Up => GRASS,
            Face::Down => continue,
            _ => STONE,
        };
        let region = atlas.region(sprite).unwrap();
        quads.push(face_quad(face, &region));
    }
    assert!(overlays.uses_overlay(quads.iter().map(|q| q.sprite)));

    let mut ctx = RenderContext::new();
    let resolver = QuadOverlayResolver::new(&atlas, &overlays);
    let out = resolver.apply_in(&ctx, &quads);
    println!("{} base quads, {} overlay quads", quads.len(), out.len());

    for overlay in &out {
        let material = overlay.material(BlendMode::Solid, true);
        println!(
            "{:?} face: sprite {:?}, pass {:?}, ao {}, light {:?}",
            overlay.quad.face,
            overlay.quad.sprite,
            material.blend,
            material.ambient_occlusion,
            overlay.quad.vertices[0].light,
        );
    }

    // Drawing the overlays re-enters the pipeline one level down; no overlays on overlays.
    let nested = ctx.nested(|ctx| {
        let overlay_quads: Vec<Quad> = out.iter().map(|o| o.quad).collect();
        resolver.apply_in(ctx, &overlay_quads)
    });
    assert!(nested.is_empty());
}
