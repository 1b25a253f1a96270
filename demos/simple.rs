use grid_util::point::Point;
use tile_astar::{AstarConfig, Pathfinder, TileMap};

// In this example a path is found on a 6x5 map with shape
//  ______
// |S..#..|
// |.#.#..|
// |.#...#|
// |.####.|
// |.....E|
//  ______
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood, but may not cut wall corners. The second search targets a
// walled-in cell, so the result leads to the closest reachable cell instead.

fn main() {
    let map = TileMap::from_ascii(
        "
        ...#..
        .#.#..
        .#...#
        .####.
        ......
        ",
    )
    .unwrap();
    let mut pathfinder = Pathfinder::from_grid(&map, AstarConfig::default()).unwrap();
    println!("{}", pathfinder);
    let start = Point::new(0, 0);
    for goal in [Point::new(5, 4), Point::new(1, 1)] {
        let path = pathfinder.find_path(start, goal).unwrap();
        println!(
            "{:?} towards {}, cost {:.3}, {} cells visited:",
            path.outcome(),
            goal,
            path.cost(),
            path.visited.len()
        );
        for p in path.route() {
            println!("{:?}", p);
        }
    }
}
