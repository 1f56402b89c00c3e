// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_atlas::{Atlas, SpriteId, SpriteRegion};
use understory_overlay::{
    Face, Light, OverlayDeclaration, OverlayRegistry, Quad, QuadOverlayResolver, Rgba8,
    StreamingQuadCompositor, Vertex, VertexCollector, VertexSink,
};

const N: u32 = 32;

/// A 32x32 grid atlas where every even sprite has the next sprite as its overlay.
fn setup() -> (Atlas, OverlayRegistry) {
    let cell = 1.0 / N as f32;
    let mut regions = Vec::new();
    for y in 0..N {
        for x in 0..N {
            let (u0, v0) = (x as f32 * cell, y as f32 * cell);
            regions.push(SpriteRegion::new(
                SpriteId(y * N + x),
                u0,
                v0,
                u0 + cell,
                v0 + cell,
            ));
        }
    }
    let overlays = (0..N * N)
        .step_by(2)
        .map(|id| {
            (
                SpriteId(id),
                OverlayDeclaration::new(SpriteId(id + 1)).emissive(id % 4 == 0),
            )
        })
        .collect();
    (Atlas::build(1, &regions), overlays)
}

fn quads(atlas: &Atlas) -> Vec<Quad> {
    atlas
        .sprite_ids()
        .filter_map(|id| atlas.region(id))
        .map(|r| {
            let uvs = [[r.u0, r.v0], [r.u1, r.v0], [r.u1, r.v1], [r.u0, r.v1]];
            Quad::new(
                core::array::from_fn(|i| {
                    Vertex::new([i as f32, 0.0, 0.0], uvs[i]).with_light(Light::new(64, 128))
                }),
                Face::South,
                r.id,
            )
        })
        .collect()
}

fn bench_batch(c: &mut Criterion) {
    let (atlas, overlays) = setup();
    let input = quads(&atlas);
    let mut group = c.benchmark_group("overlay_batch");
    group.throughput(Throughput::Elements(input.len() as u64));
    group.bench_function("apply_grid_32", |b| {
        let resolver = QuadOverlayResolver::new(&atlas, &overlays);
        b.iter(|| black_box(resolver.apply(&input).len()))
    });
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let (atlas, overlays) = setup();
    let input = quads(&atlas);
    let mut group = c.benchmark_group("overlay_stream");
    group.throughput(Throughput::Elements(input.len() as u64));
    group.bench_function("stream_grid_32", |b| {
        b.iter(|| {
            let mut comp =
                StreamingQuadCompositor::new(&atlas, &overlays, VertexCollector::new());
            for quad in &input {
                for v in quad.vertices {
                    comp.set_position(v.position);
                    comp.set_color(Rgba8::WHITE);
                    comp.set_uv(v.uv);
                    comp.set_light(v.light);
                    comp.end_vertex();
                }
            }
            black_box(comp.emitted_quads())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_batch, bench_stream);
criterion_main!(benches);
