use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::point::Point;
use rand::prelude::*;
use std::hint::black_box;
use tile_astar::{AstarConfig, Heuristic, Pathfinder, TileMap, TileSet};

fn random_map(n: usize, density: f64, seed: u64) -> TileMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tileset = TileSet::new();
    tileset.set_property(1, "walkable", "false");
    let mut map = TileMap::new(n, n, Some(0), tileset);
    for x in 0..n {
        for y in 0..n {
            if rng.gen_bool(density) {
                map.set_tile(x, y, Some(1));
            }
        }
    }
    map.set_tile(0, 0, Some(0));
    map.set_tile(n - 1, n - 1, Some(0));
    map
}

fn random_bench_single(c: &mut Criterion) {
    const N: usize = 64;
    let map = random_map(N, 0.25, 0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for (allow_diag, heuristic) in [(false, Heuristic::Manhattan), (true, Heuristic::Euclidean)] {
        let config = AstarConfig::default()
            .with_diagonal(allow_diag)
            .with_heuristic(heuristic)
            .with_debug_tracking(false);
        let mut pathfinder = Pathfinder::from_grid(&map, config).unwrap();
        let diag_str = if allow_diag { "8-grid" } else { "4-grid" };
        c.bench_function(format!("random {N}x{N}, {diag_str}").as_str(), |b| {
            b.iter(|| black_box(pathfinder.find_path(start, end)))
        });
    }
}

fn refresh_bench(c: &mut Criterion) {
    let map = random_map(128, 0.3, 1);
    let mut pathfinder = Pathfinder::new(AstarConfig::default()).unwrap();
    c.bench_function("refresh 128x128", |b| {
        b.iter(|| black_box(pathfinder.refresh(&map)))
    });
}

criterion_group!(benches, random_bench_single, refresh_bench);
criterion_main!(benches);
