//! maze-demo: build a seeded random maze and run every search on it.
//!
//! Usage: `maze-demo [SEED] [TURN_COST]`. Set `RUST_LOG=debug` to see the
//! engine's own summaries.

use anyhow::{Context, bail};
use gridpath::{SearchEngine, bfs_reachable};
use gridpath_core::{Dir, Point, Range};
use gridpath_maze::{
    Facing, Maze, OrientedMaze, count_jump_shortcuts, count_wall_shortcuts,
    par_count_wall_shortcuts,
};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const WIDTH: i32 = 41;
const HEIGHT: i32 = 21;
const WALL_PERCENT: u32 = 28;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed {s:?}"))?,
        None => 1,
    };
    let turn_cost: i32 = match args.next() {
        Some(s) => s
            .parse()
            .with_context(|| format!("invalid turn cost {s:?}"))?,
        None => 1000,
    };
    if turn_cost < 0 {
        bail!("turn cost must be non-negative, got {turn_cost}");
    }

    let (mut maze, start, goal) = generate(seed);
    print(&maze, start, goal);

    let mut engine = SearchEngine::astar(&maze);
    let Some((path, dist)) = engine.shortest_path(start, goal)? else {
        log::info!("seed {seed}: goal {goal} unreachable from {start}");
        let reach = bfs_reachable(&maze, &[start], None);
        log::info!("{} cell(s) reachable from the start", reach.len());
        return Ok(());
    };
    log::info!("seed {seed}: shortest distance {dist} ({} steps)", path.steps());

    let set = SearchEngine::new(&maze)
        .all_shortest_paths(start, goal)?
        .context("goal reachable but no path set")?;
    log::info!(
        "{} shortest path(s) covering {} cell(s)",
        set.len(),
        set.covered(|&p| p).len()
    );

    let tight = engine.shortest_distance_bounded(start, goal, dist - 1)?;
    log::info!("bounded by {}: {tight:?}", dist - 1);

    let oriented = OrientedMaze::new(&maze, turn_cost);
    let from = Facing::new(start, Dir::East);
    let to = Facing::new(goal, Dir::North);
    if let Some(seats) = SearchEngine::new(&oriented).all_shortest_paths(from, to)? {
        log::info!(
            "with turn cost {turn_cost}: best score {}, {} cell(s) on a best path",
            seats.cost,
            seats.covered(|f| f.pos).len()
        );
    }

    let saving = (dist / 5).max(1);
    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
    let serial = count_wall_shortcuts(&mut maze, start, goal, dist - saving)?;
    let parallel = par_count_wall_shortcuts(&maze, start, goal, dist - saving, workers)?;
    if serial != parallel {
        bail!("serial ({serial}) and parallel ({parallel}) wall trials disagree");
    }
    log::info!("{serial} single-wall removal(s) save at least {saving}");

    for max_jump in [2, 20] {
        let n = count_jump_shortcuts(&maze, start, goal, max_jump, saving).unwrap_or(0);
        log::info!("{n} jump(s) of length <= {max_jump} save at least {saving}");
    }
    Ok(())
}

fn generate(seed: u64) -> (Maze, Point, Point) {
    let mut rng = StdRng::seed_from_u64(seed);
    let bounds = Range::new(0, 0, WIDTH, HEIGHT);
    let inner = bounds.inner(1);
    let start = inner.min;
    let goal = inner.max - Point::new(1, 1);
    let walls: Vec<Point> = bounds
        .iter()
        .filter(|&p| {
            p != start
                && p != goal
                && (!inner.contains(p) || rng.random_range(0..100) < WALL_PERCENT)
        })
        .collect();
    (Maze::with_walls(WIDTH, HEIGHT, walls), start, goal)
}

fn print(maze: &Maze, start: Point, goal: Point) {
    let b = maze.bounds();
    for y in b.min.y..b.max.y {
        let row: String = (b.min.x..b.max.x)
            .map(|x| {
                let p = Point::new(x, y);
                if p == start {
                    'S'
                } else if p == goal {
                    'E'
                } else if maze.is_open(p) {
                    '.'
                } else {
                    '#'
                }
            })
            .collect();
        println!("{row}");
    }
}
