//! Criterion benchmarks for the rectangle search.
//! Focus: both variants over point_gap in {0.2, 0.1, 0.05} on radius-1 polygons,
//! plus the building blocks (resampling, segment containment).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use maxrect::prelude::*;
use maxrect::resample_boundary;

fn polygon(convex: bool) -> Polygon {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(10),
        convex,
        ..RadialCfg::default()
    };
    draw_polygon_radial(cfg, ReplayToken { seed: 42, index: 0 }).unwrap()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    for (variant, convex) in [(Variant::Convex, true), (Variant::General, true), (Variant::General, false)] {
        let poly = polygon(convex);
        let oracle = GeoOracle::new(&poly);
        for &gap in &[0.2f64, 0.1, 0.05] {
            let id = format!("{}/{}", variant.name(), if convex { "convex" } else { "star" });
            group.bench_with_input(BenchmarkId::new(id, gap), &gap, |b, &gap| {
                let cfg = SearchCfg::for_variant(variant).with_point_gap(gap);
                b.iter(|| {
                    let _sol = find_rectangle_with(&poly, &oracle, &cfg, &CancelToken::new()).unwrap();
                })
            });
        }
    }
    group.finish();
}

fn bench_serial_vs_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(10);
    let poly = polygon(false);
    let oracle = GeoOracle::new(&poly);
    for parallel in [false, true] {
        let mut cfg = SearchCfg::for_variant(Variant::General).with_point_gap(0.1);
        cfg.parallel = parallel;
        let name = if parallel { "parallel" } else { "serial" };
        group.bench_function(name, |b| {
            b.iter(|| {
                let _sol = find_rectangle_with(&poly, &oracle, &cfg, &CancelToken::new()).unwrap();
            })
        });
    }
    group.finish();
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");
    let poly = polygon(false);
    let oracle = GeoOracle::new(&poly);
    group.bench_function("resample_boundary/0.01", |b| {
        b.iter(|| {
            let _pts = resample_boundary(&poly, 0.01).unwrap();
        })
    });
    let pts = resample_boundary(&poly, 0.1).unwrap();
    group.bench_function("contains_segment/all_pairs_from_v0", |b| {
        b.iter(|| pts.iter().filter(|q| oracle.contains_segment(pts[0], **q)).count())
    });
    group.finish();
}

criterion_group!(benches, bench_search, bench_serial_vs_parallel, bench_primitives);
criterion_main!(benches);
