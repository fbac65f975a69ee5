//! Timing run: largest rectangle in a handful of random polygons.
//!
//! Prints one line per polygon with both variants side by side, so the cost of
//! the general sweep against the convex ray clip is visible on the same input.
//!
//! Run: `cargo run --release -p maxrect --example random_rect`

use std::time::Instant;

use maxrect::prelude::*;

fn main() {
    for index in 0..5 {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Uniform { min: 5, max: 12 },
            convex: index % 2 == 0,
            ..RadialCfg::default()
        };
        let poly = draw_polygon_radial(cfg, ReplayToken { seed: 2024, index })
            .expect("random polygon");
        let mut line = format!(
            "#{index} n={} convex={} area={:.4}",
            poly.len(),
            poly.is_convex(),
            poly.area()
        );
        for variant in [Variant::Convex, Variant::General] {
            if variant == Variant::Convex && !poly.is_convex() {
                continue;
            }
            let t0 = Instant::now();
            let sol = find_rectangle(&poly, variant.default_point_gap(), variant)
                .expect("rectangle");
            line.push_str(&format!(
                " | {} rect={:.4} ({:.1}%) {:?}",
                variant.name(),
                sol.area,
                100.0 * sol.area / poly.area(),
                t0.elapsed()
            ));
        }
        println!("{line}");
    }
}
