use std::hint::black_box;
use std::time::Instant;

use facehover_common::Rotation;
use facehover_scene::{BoxGeometry, FacePicker, PerspectiveCamera};
use glam::Vec2;

fn sweep_points(count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let f = i as f32 / count as f32;
            Vec2::new(f * 2.0 - 1.0, (f * 7.0).sin())
        })
        .collect()
}

fn bench_pick_sweep(points: usize, iterations: usize) {
    let geometry = BoxGeometry::unit();
    let camera = PerspectiveCamera::default();
    let ndc = sweep_points(points);
    let mut rotation = Rotation::default();

    let mut hits = 0usize;
    let start = Instant::now();
    for _ in 0..iterations {
        rotation.advance(0.01);
        let model = rotation.matrix();
        for p in &ndc {
            let outcome = FacePicker::pick_from_camera(
                black_box(&geometry),
                black_box(model),
                black_box(&camera),
                black_box(*p),
            );
            hits += outcome.is_hit() as usize;
        }
    }
    let elapsed = start.elapsed();
    let per_pick = elapsed / (points * iterations) as u32;
    println!(
        "  pick sweep ({points} points, {iterations} iters, {hits} hits): {per_pick:?}/pick, total {elapsed:?}"
    );
}

fn bench_group_lookup(iterations: usize) {
    let geometry = BoxGeometry::unit();
    let start = Instant::now();
    let mut found = 0usize;
    for i in 0..iterations {
        let t = i % (geometry.triangle_count() + 1);
        found += black_box(geometry.material_index_for_triangle(black_box(t))).is_some() as usize;
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  group lookup ({iterations} iters, {found} found): {per_iter:?}/lookup, total {elapsed:?}");
}

fn main() {
    println!("=== Face Picking Benchmarks ===\n");

    println!("Pick sweep (rotating cube):");
    bench_pick_sweep(64, 1000);
    bench_pick_sweep(256, 100);

    println!("\nGroup lookup:");
    bench_group_lookup(1_000_000);

    println!("\n=== Done ===");
}
