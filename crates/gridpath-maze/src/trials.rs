//! Shortcut counting over many small variations of one maze.
//!
//! Two strategies are offered for "how many single-wall removals make the
//! goal reachable within a budget": serial trials that toggle the wall in
//! place ([`count_wall_shortcuts`]), and parallel trials where every worker
//! owns a deep copy of the maze ([`par_count_wall_shortcuts`]). When the
//! shortcut is a free jump rather than a removed wall, two BFS maps answer
//! every candidate at once ([`count_jump_shortcuts`]).

use gridpath::{SearchEngine, SearchError, bfs_reachable, manhattan};
use gridpath_core::Point;

use crate::maze::Maze;

/// Number of inner walls whose removal alone brings the shortest
/// `start → goal` distance to at most `max_cost`.
///
/// Each trial opens one wall, runs a bounded A* search and closes the wall
/// again, so `maze` is unchanged on return, error or not.
pub fn count_wall_shortcuts(
    maze: &mut Maze,
    start: Point,
    goal: Point,
    max_cost: i32,
) -> Result<usize, SearchError> {
    let candidates = maze.inner_walls();
    let n = count_in(maze, &candidates, start, goal, max_cost)?;
    log::debug!("{n} of {} wall removals reach cost <= {max_cost}", candidates.len());
    Ok(n)
}

/// [`count_wall_shortcuts`] split across `workers` threads.
///
/// Every worker toggles walls on its own clone of `maze`; nothing mutable
/// is shared between them.
pub fn par_count_wall_shortcuts(
    maze: &Maze,
    start: Point,
    goal: Point,
    max_cost: i32,
    workers: usize,
) -> Result<usize, SearchError> {
    let candidates = maze.inner_walls();
    if candidates.is_empty() {
        return Ok(0);
    }
    let workers = workers.clamp(1, candidates.len());
    let chunk = candidates.len().div_ceil(workers);
    log::debug!(
        "{} wall removal trials on {workers} worker(s)",
        candidates.len()
    );

    std::thread::scope(|scope| {
        let handles: Vec<_> = candidates
            .chunks(chunk)
            .map(|walls| {
                let mut local = maze.clone();
                scope.spawn(move || count_in(&mut local, walls, start, goal, max_cost))
            })
            .collect();
        let mut total = 0;
        for handle in handles {
            total += handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))?;
        }
        Ok(total)
    })
}

fn count_in(
    maze: &mut Maze,
    walls: &[Point],
    start: Point,
    goal: Point,
    max_cost: i32,
) -> Result<usize, SearchError> {
    let mut n = 0;
    for &wall in walls {
        let Some(opened) = maze.open_wall(wall) else {
            continue;
        };
        let d = SearchEngine::astar(&*opened).shortest_distance_bounded(start, goal, max_cost)?;
        if d.is_some() {
            log::trace!("removing {wall} reaches the goal within {max_cost}");
            n += 1;
        }
    }
    Ok(n)
}

/// Number of `(a, b)` jumps that save at least `min_saving` over the honest
/// shortest path, where a jump leaves the track at open cell `a`, lands on
/// open cell `b` at Manhattan distance ≤ `max_jump`, and costs that
/// distance.
///
/// Returns `None` if `goal` is unreachable without jumping.
pub fn count_jump_shortcuts(
    maze: &Maze,
    start: Point,
    goal: Point,
    max_jump: i32,
    min_saving: i32,
) -> Option<usize> {
    let from_start = bfs_reachable(maze, &[start], None);
    let honest = from_start.get(&goal)?;
    let from_goal = bfs_reachable(maze, &[goal], None);
    let n = from_start.count_detours(&from_goal, honest.saturating_sub(min_saving), |a, b| {
        let d = manhattan(a, b);
        (d <= max_jump).then_some(d)
    });
    log::debug!("{n} jump(s) of <= {max_jump} save >= {min_saving} on honest cost {honest}");
    Some(n)
}

/// Index of the first wall in `walls` after whose placement, together with
/// all earlier ones, `goal` is no longer reachable from `start` in an
/// otherwise open `width × height` maze.
///
/// Returns `None` if the goal stays reachable with every wall placed, or if
/// it is unreachable before any is placed.
pub fn first_blocking_wall(
    width: i32,
    height: i32,
    start: Point,
    goal: Point,
    walls: &[Point],
) -> Option<usize> {
    let blocked = |k: usize| {
        let maze = Maze::with_walls(width, height, walls[..k].iter().copied());
        !bfs_reachable(&maze, &[start], None).contains(&goal)
    };
    if !blocked(walls.len()) {
        return None;
    }
    // Smallest prefix length that blocks.
    let (mut lo, mut hi) = (0, walls.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if blocked(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo.checked_sub(1)
}
