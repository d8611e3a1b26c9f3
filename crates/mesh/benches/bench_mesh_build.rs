use std::hint::black_box;
use std::time::Instant;

use terrainview_heightmap::{Heightmap, Pattern, synthesize};
use terrainview_mesh::{GridLayout, TerrainMesh, generate_indices, generate_vertices};

fn make_heightmap(width: u32) -> Heightmap {
    Heightmap::from_bytes(&synthesize(width, Pattern::Radial), width, 10.0)
        .expect("synthesized heightmap matches its width")
}

fn bench_vertices(width: u32, iterations: usize) {
    let map = make_heightmap(width);
    let layout = GridLayout::new(width);

    let start = Instant::now();
    for _ in 0..iterations {
        let verts = generate_vertices(black_box(map.heights()), &layout).unwrap();
        black_box(verts);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  vertices ({width}x{width}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_indices(width: u32, iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(generate_indices(black_box(width)).unwrap());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  indices ({width}x{width}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_full_build(width: u32, iterations: usize) {
    let map = make_heightmap(width);
    let layout = GridLayout::new(width);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(TerrainMesh::build(black_box(&map), &layout).unwrap());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  build ({width}x{width}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("terrainview-mesh benchmarks");
    for width in [65, 257, 1025] {
        let iterations = if width > 512 { 10 } else { 100 };
        bench_vertices(width, iterations);
        bench_indices(width, iterations);
        bench_full_build(width, iterations);
    }
}
