use std::hint::black_box;
use std::time::Instant;

use gridwave_mesh::GridMeshBuilder;

fn bench_build(segments: u32, iterations: usize) {
    let builder = GridMeshBuilder::new(500.0, 500.0, segments, segments).with_seed(42);

    let start = Instant::now();
    let mut index_count = 0;
    for _ in 0..iterations {
        let mesh = black_box(&builder).build().expect("valid grid parameters");
        index_count = black_box(mesh.index_count());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  build ({segments}x{segments} segments, {index_count} indices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_winding_scan(segments: u32, iterations: usize) {
    let mesh = GridMeshBuilder::new(500.0, 500.0, segments, segments)
        .with_seed(42)
        .build()
        .expect("valid grid parameters");

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(mesh.clockwise_triangle_count());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  winding scan ({} triangles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        mesh.triangle_count()
    );
}

fn main() {
    println!("grid mesh benchmarks");
    bench_build(64, 200);
    bench_build(256, 20);
    bench_build(1000, 3);
    bench_winding_scan(256, 20);
}
