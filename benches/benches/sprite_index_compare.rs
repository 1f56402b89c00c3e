// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_atlas::{IntervalIndex, QuadTree, SpatialSpriteIndex, SpriteId, SpriteRegion};

/// `n * n` equally sized sprites tiling the atlas.
fn gen_grid_atlas(n: u32) -> Vec<SpriteRegion> {
    let cell = 1.0 / n as f32;
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            let u0 = x as f32 * cell;
            let v0 = y as f32 * cell;
            out.push(SpriteRegion::new(
                SpriteId(y * n + x),
                u0,
                v0,
                u0 + cell,
                v0 + cell,
            ));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

/// Shelf-packed sprites of mixed power-of-two sizes in a `size`-pixel atlas, the way a
/// stitcher lays out 16/32/64 pixel textures.
fn gen_shelf_atlas(size: u32, count: usize) -> Vec<SpriteRegion> {
    let mut rng = Rng::new(0xA71A_5EED_0BAD_CAFE);
    let px = 1.0 / size as f32;
    let mut out = Vec::with_capacity(count);
    let (mut x, mut y, mut shelf) = (0_u32, 0_u32, 0_u32);
    for id in 0..count as u32 {
        let side = 16 << rng.next_below(3);
        if x + side > size {
            x = 0;
            y += shelf;
            shelf = 0;
        }
        if y + side > size {
            break;
        }
        out.push(SpriteRegion::new(
            SpriteId(id),
            x as f32 * px,
            y as f32 * px,
            (x + side) as f32 * px,
            (y + side) as f32 * px,
        ));
        x += side;
        shelf = shelf.max(side);
    }
    out
}

fn centers(regions: &[SpriteRegion]) -> Vec<(f32, f32)> {
    regions.iter().map(|r| r.rect().center()).collect()
}

fn bench_build<I: SpatialSpriteIndex>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("{name}_build"));
    for &n in &[16_u32, 32, 64] {
        let regions = gen_grid_atlas(n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{n}"), |b| {
            b.iter_batched(
                || regions.clone(),
                |regions| black_box(I::build(&regions)),
                BatchSize::SmallInput,
            )
        });
    }
    let regions = gen_shelf_atlas(2048, 4096);
    group.throughput(Throughput::Elements(regions.len() as u64));
    group.bench_function("shelf_2048", |b| {
        b.iter(|| black_box(I::build(&regions)))
    });
    group.finish();
}

fn bench_find<I: SpatialSpriteIndex>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("{name}_find"));
    for &n in &[16_u32, 64] {
        let regions = gen_grid_atlas(n);
        let index = I::build(&regions);
        let queries = centers(&regions);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("grid_centers_n{n}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for &(u, v) in &queries {
                    hits += usize::from(index.find(u, v).is_some());
                }
                black_box(hits)
            })
        });
    }
    let regions = gen_shelf_atlas(2048, 4096);
    let index = I::build(&regions);
    let queries = centers(&regions);
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("shelf_centers_2048", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for &(u, v) in &queries {
                hits += usize::from(index.find(u, v).is_some());
            }
            black_box(hits)
        })
    });
    group.finish();
}

fn bench_quadtree(c: &mut Criterion) {
    bench_build::<QuadTree>(c, "quadtree");
    bench_find::<QuadTree>(c, "quadtree");
}

fn bench_interval(c: &mut Criterion) {
    bench_build::<IntervalIndex>(c, "interval");
    bench_find::<IntervalIndex>(c, "interval");
}

criterion_group!(benches, bench_quadtree, bench_interval);
criterion_main!(benches);
