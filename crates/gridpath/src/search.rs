//! Best-first search core: Dijkstra / A* with tie tracking and cost ceilings.

use std::collections::HashMap;

use crate::SearchEngine;
use crate::engine::Heuristic;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::reconstruct::{Path, PathSet, Predecessors};
use crate::traits::WeightedPather;

/// When the expansion loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GoalPolicy {
    /// At the first goal pop.
    First,
    /// Once the popped priority exceeds the first goal cost, so every goal
    /// state tied at the minimum (e.g. each heading on the exit) is kept.
    AllTied,
}

/// Per-state search bookkeeping: best cost, tied parents, finalized flag.
#[derive(Debug)]
struct Node<S> {
    g: i32,
    parents: Vec<S>,
    closed: bool,
}

/// Raw result of one expansion run.
pub(crate) struct Outcome<S> {
    pub(crate) cost: Option<i32>,
    pub(crate) goals: Vec<S>,
    pub(crate) preds: Predecessors<S>,
}

impl<'a, P: WeightedPather, H: Heuristic<P>> SearchEngine<'a, P, H> {
    /// Minimum cost from `start` to a state matching `goal`, or `None` if no
    /// goal state is reachable (within the configured ceiling, if any).
    ///
    /// # Errors
    ///
    /// Fails only when the adapter breaks its contract; see [`SearchError`].
    pub fn shortest_distance(
        &mut self,
        start: P::State,
        goal: P::State,
    ) -> Result<Option<i32>, SearchError> {
        let max_cost = self.config.max_cost;
        Ok(self.run(start, goal, max_cost, GoalPolicy::First)?.cost)
    }

    /// Like [`shortest_distance`](Self::shortest_distance), but successors
    /// whose cumulative cost exceeds `max_cost` are never enqueued.
    ///
    /// Returns `None` exactly when the true distance is above `max_cost`.
    pub fn shortest_distance_bounded(
        &mut self,
        start: P::State,
        goal: P::State,
        max_cost: i32,
    ) -> Result<Option<i32>, SearchError> {
        Ok(self.run(start, goal, Some(max_cost), GoalPolicy::First)?.cost)
    }

    /// One minimum-cost path and its cost.
    pub fn shortest_path(
        &mut self,
        start: P::State,
        goal: P::State,
    ) -> Result<Option<(Path<P::State>, i32)>, SearchError> {
        let max_cost = self.config.max_cost;
        let out = self.run(start, goal, max_cost, GoalPolicy::First)?;
        Ok(match (out.cost, out.goals.first()) {
            (Some(cost), Some(&g)) => Some((out.preds.first_path_to(g), cost)),
            _ => None,
        })
    }

    /// Every distinct minimum-cost path to every tied goal state.
    ///
    /// Returns `None` when the goal is unreachable; otherwise the set holds
    /// at least one path. Paths never repeat a state and end at the first
    /// goal state they reach, so zero-cost cycles (free turns) neither loop
    /// nor multiply the result. Complete under Dijkstra and under A* with a
    /// consistent estimate.
    pub fn all_shortest_paths(
        &mut self,
        start: P::State,
        goal: P::State,
    ) -> Result<Option<PathSet<P::State>>, SearchError> {
        let max_cost = self.config.max_cost;
        self.all_paths_within(start, goal, max_cost)
    }

    /// [`all_shortest_paths`](Self::all_shortest_paths) under a cost ceiling.
    pub fn all_shortest_paths_bounded(
        &mut self,
        start: P::State,
        goal: P::State,
        max_cost: i32,
    ) -> Result<Option<PathSet<P::State>>, SearchError> {
        self.all_paths_within(start, goal, Some(max_cost))
    }

    fn all_paths_within(
        &mut self,
        start: P::State,
        goal: P::State,
        max_cost: Option<i32>,
    ) -> Result<Option<PathSet<P::State>>, SearchError> {
        let out = self.run(start, goal, max_cost, GoalPolicy::AllTied)?;
        let Some(cost) = out.cost else {
            return Ok(None);
        };
        let paths = out.preds.paths_to(&out.goals);
        log::debug!(
            "{} optimal path(s) at cost {cost} across {} goal state(s)",
            paths.len(),
            out.goals.len()
        );
        Ok(Some(PathSet {
            cost,
            goals: out.goals,
            paths,
        }))
    }

    /// Drive the frontier until the goal policy is satisfied or the frontier
    /// empties.
    pub(crate) fn run(
        &mut self,
        start: P::State,
        goal: P::State,
        max_cost: Option<i32>,
        policy: GoalPolicy,
    ) -> Result<Outcome<P::State>, SearchError> {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let result = self.expand(&mut nbuf, start, goal, max_cost, policy);
        self.nbuf = nbuf;
        result
    }

    fn expand(
        &self,
        nbuf: &mut Vec<P::State>,
        start: P::State,
        goal: P::State,
        max_cost: Option<i32>,
        policy: GoalPolicy,
    ) -> Result<Outcome<P::State>, SearchError> {
        log::debug!("search {start:?} -> {goal:?} ({policy:?}, max_cost {max_cost:?})");

        let mut nodes: HashMap<P::State, Node<P::State>> = HashMap::new();
        let mut open = Frontier::new();
        let mut best: Option<i32> = None;
        let mut goals = Vec::new();
        let mut expansions = 0usize;

        if max_cost.is_none_or(|m| m >= 0) {
            nodes.insert(
                start,
                Node {
                    g: 0,
                    parents: Vec::new(),
                    closed: false,
                },
            );
            open.push(start, self.estimate(start, goal)?);
        }

        while let Some((cur, priority)) = open.pop_min() {
            if best.is_some_and(|b| priority > b) {
                break;
            }
            let Some(node) = nodes.get_mut(&cur) else {
                continue;
            };
            if node.closed {
                log::trace!("discarding stale entry {cur:?}");
                continue;
            }
            node.closed = true;
            let g = node.g;

            expansions += 1;
            self.check_expansions(expansions)?;

            if self.pather.is_goal(cur, goal) {
                log::trace!("goal {cur:?} at cost {g}");
                best.get_or_insert(g);
                goals.push(cur);
                if policy == GoalPolicy::First {
                    break;
                }
            }

            nbuf.clear();
            self.pather.neighbors(cur, nbuf);

            for &next in nbuf.iter() {
                let step = self.step_cost(cur, next)?;
                let tentative = Self::add_cost(g, step, cur, next)?;
                if max_cost.is_some_and(|m| tentative > m) {
                    continue;
                }
                match nodes.get_mut(&next) {
                    // A tied arrival at a finalized state: zero-cost steps,
                    // or a child popped first on an equal priority.
                    Some(n) if n.closed => {
                        if tentative == n.g && next != start && !n.parents.contains(&cur) {
                            log::trace!("late tie at {next:?}: extra parent {cur:?}");
                            n.parents.push(cur);
                        }
                    }
                    Some(n) if tentative < n.g => {
                        n.g = tentative;
                        n.parents.clear();
                        n.parents.push(cur);
                        let h = self.estimate(next, goal)?;
                        let f = Self::add_cost(tentative, h, cur, next)?;
                        open.decrease_priority(next, f)?;
                    }
                    Some(n) if tentative == n.g => {
                        if !n.parents.contains(&cur) {
                            log::trace!("tie at {next:?}: extra parent {cur:?}");
                            n.parents.push(cur);
                        }
                    }
                    Some(_) => {}
                    None => {
                        let h = self.estimate(next, goal)?;
                        let f = Self::add_cost(tentative, h, cur, next)?;
                        nodes.insert(
                            next,
                            Node {
                                g: tentative,
                                parents: vec![cur],
                                closed: false,
                            },
                        );
                        open.push(next, f);
                    }
                }
            }
        }

        log::debug!(
            "search finished: cost {best:?}, {} goal state(s), {expansions} expansion(s), frontier peak {}",
            goals.len(),
            open.high_water()
        );

        let mut preds = Predecessors::new();
        if best.is_some() {
            for (s, n) in nodes {
                if n.closed {
                    preds.insert(s, n.parents);
                }
            }
        }
        Ok(Outcome {
            cost: best,
            goals,
            preds,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashSet;

    use gridpath_core::{Dir, Point, Range};

    use crate::traits::{AstarPather, Pather};
    use crate::{SearchConfig, manhattan};

    use super::*;

    /// Open grid with optional walls, unit steps, Manhattan estimate.
    struct Field {
        rng: Range,
        walls: HashSet<Point>,
        calls: Cell<usize>,
    }

    impl Field {
        fn new(w: i32, h: i32, walls: &[(i32, i32)]) -> Self {
            Self {
                rng: Range::new(0, 0, w, h),
                walls: walls.iter().map(|&(x, y)| Point::new(x, y)).collect(),
                calls: Cell::new(0),
            }
        }
    }

    impl Pather for Field {
        type State = Point;
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            self.calls.set(self.calls.get() + 1);
            for n in p.neighbors_4() {
                if self.rng.contains(n) && !self.walls.contains(&n) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for Field {
        fn cost(&self, _: Point, _: Point) -> i32 {
            1
        }
    }

    impl AstarPather for Field {
        fn estimate(&self, from: Point, goal: Point) -> i32 {
            manhattan(from, goal)
        }
    }

    /// Position + heading; forward costs 1, a 90° turn costs `turn`.
    struct Racer {
        field: Field,
        turn: i32,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Pose(Point, Dir);

    impl Pather for Racer {
        type State = Pose;
        fn neighbors(&self, Pose(p, d): Pose, buf: &mut Vec<Pose>) {
            let ahead = p.step(d);
            if self.field.rng.contains(ahead) && !self.field.walls.contains(&ahead) {
                buf.push(Pose(ahead, d));
            }
            buf.push(Pose(p, d.clockwise()));
            buf.push(Pose(p, d.counter_clockwise()));
        }
        fn is_goal(&self, s: Pose, goal: Pose) -> bool {
            s.0 == goal.0
        }
    }

    impl WeightedPather for Racer {
        fn cost(&self, from: Pose, to: Pose) -> i32 {
            if from.1 == to.1 { 1 } else { self.turn }
        }
    }

    impl AstarPather for Racer {
        fn estimate(&self, from: Pose, goal: Pose) -> i32 {
            manhattan(from.0, goal.0)
        }
    }

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn open_grid_distance_is_manhattan() {
        let f = Field::new(6, 4, &[]);
        let mut e = SearchEngine::new(&f);
        assert_eq!(e.shortest_distance(pt(0, 0), pt(5, 3)).unwrap(), Some(8));
        let mut a = SearchEngine::astar(&f);
        assert_eq!(a.shortest_distance(pt(0, 0), pt(5, 3)).unwrap(), Some(8));
    }

    #[test]
    fn wall_forces_two_step_detour() {
        // 3×3, wall in the middle column blocks the straight row.
        //   . # .
        //   S # G
        //   . . .
        let f = Field::new(3, 3, &[(1, 0), (1, 1)]);
        let (s, g) = (pt(0, 1), pt(2, 1));
        let d = SearchEngine::new(&f).shortest_distance(s, g).unwrap();
        assert_eq!(d, Some(manhattan(s, g) + 2));
        let d = SearchEngine::astar(&f).shortest_distance(s, g).unwrap();
        assert_eq!(d, Some(4));
    }

    #[test]
    fn start_equals_goal() {
        let f = Field::new(3, 3, &[]);
        let mut e = SearchEngine::new(&f);
        assert_eq!(e.shortest_distance(pt(1, 1), pt(1, 1)).unwrap(), Some(0));
        let set = e.all_shortest_paths(pt(1, 1), pt(1, 1)).unwrap().unwrap();
        assert_eq!(set.cost, 0);
        assert_eq!(set.len(), 1);
        assert_eq!(set.paths[0].to_vec(), vec![pt(1, 1)]);
    }

    #[test]
    fn unreachable_is_none_not_error() {
        // Goal sealed off by walls.
        let f = Field::new(3, 3, &[(1, 2), (2, 1)]);
        let mut e = SearchEngine::new(&f);
        assert_eq!(e.shortest_distance(pt(0, 0), pt(2, 2)).unwrap(), None);
        assert_eq!(e.shortest_path(pt(0, 0), pt(2, 2)).unwrap(), None);
        assert_eq!(e.all_shortest_paths(pt(0, 0), pt(2, 2)).unwrap(), None);
    }

    #[test]
    fn bound_below_true_distance_is_unreachable() {
        let f = Field::new(5, 5, &[]);
        let mut e = SearchEngine::new(&f);
        let (s, g) = (pt(0, 0), pt(4, 4));
        assert_eq!(e.shortest_distance_bounded(s, g, 7).unwrap(), None);
        assert_eq!(e.all_shortest_paths_bounded(s, g, 7).unwrap(), None);
        assert_eq!(e.shortest_distance_bounded(s, g, 8).unwrap(), Some(8));
        assert_eq!(e.shortest_distance_bounded(s, g, 100).unwrap(), Some(8));
        assert_eq!(e.shortest_distance_bounded(s, s, -1).unwrap(), None);
    }

    #[test]
    fn bounded_search_explores_less() {
        let f = Field::new(30, 30, &[]);
        let mut e = SearchEngine::new(&f);
        e.shortest_distance(pt(0, 0), pt(29, 29)).unwrap();
        let full = f.calls.replace(0);
        e.shortest_distance_bounded(pt(0, 0), pt(29, 29), 5).unwrap();
        assert!(f.calls.get() < full / 10);
    }

    #[test]
    fn config_ceiling_applies_by_default() {
        let f = Field::new(5, 5, &[]);
        let mut e = SearchEngine::new(&f).with_config(SearchConfig::new().with_max_cost(3));
        assert_eq!(e.shortest_distance(pt(0, 0), pt(4, 4)).unwrap(), None);
        assert_eq!(e.shortest_distance(pt(0, 0), pt(1, 2)).unwrap(), Some(3));
        // An explicit bound overrides the configured one.
        assert_eq!(
            e.shortest_distance_bounded(pt(0, 0), pt(4, 4), 8).unwrap(),
            Some(8)
        );
    }

    #[test]
    fn repeated_queries_agree() {
        let f = Field::new(8, 8, &[(3, 0), (3, 1), (3, 2), (3, 3), (3, 4), (3, 5)]);
        let mut e = SearchEngine::new(&f);
        let first = e.shortest_distance(pt(0, 0), pt(7, 0)).unwrap();
        for _ in 0..3 {
            assert_eq!(e.shortest_distance(pt(0, 0), pt(7, 0)).unwrap(), first);
        }
        assert_eq!(first, Some(19));
    }

    #[test]
    fn shortest_path_is_connected_and_costed() {
        let f = Field::new(4, 4, &[(1, 1), (2, 1)]);
        let mut e = SearchEngine::astar(&f);
        let (path, cost) = e.shortest_path(pt(0, 2), pt(3, 0)).unwrap().unwrap();
        assert_eq!(cost, 5);
        assert_eq!(path.steps() as i32, cost);
        assert_eq!(path.start(), Some(pt(0, 2)));
        assert_eq!(path.goal(), Some(pt(3, 0)));
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
        }
    }

    #[test]
    fn two_corridors_give_two_paths() {
        // S . .
        // . # .
        // . . G
        let f = Field::new(3, 3, &[(1, 1)]);
        let set = SearchEngine::new(&f)
            .all_shortest_paths(pt(0, 0), pt(2, 2))
            .unwrap()
            .unwrap();
        assert_eq!(set.cost, 4);
        assert_eq!(set.len(), 2);
        let distinct: HashSet<Vec<Point>> = set.iter().map(|p| p.to_vec()).collect();
        assert_eq!(distinct.len(), 2);
        assert!(distinct.contains(&vec![pt(0, 0), pt(1, 0), pt(2, 0), pt(2, 1), pt(2, 2)]));
        assert!(distinct.contains(&vec![pt(0, 0), pt(0, 1), pt(0, 2), pt(1, 2), pt(2, 2)]));
    }

    #[test]
    fn open_square_paths_count_binomial() {
        // 3×3 open: C(4, 2) = 6 monotone paths corner to corner.
        let f = Field::new(3, 3, &[]);
        for set in [
            SearchEngine::new(&f).all_shortest_paths(pt(0, 0), pt(2, 2)),
            SearchEngine::astar(&f).all_shortest_paths(pt(0, 0), pt(2, 2)),
        ] {
            let set = set.unwrap().unwrap();
            assert_eq!(set.len(), 6);
            let distinct: HashSet<_> = set.iter().cloned().collect();
            assert_eq!(distinct.len(), 6);
            assert_eq!(set.covered(|&p| p).len(), 9);
        }
    }

    #[test]
    fn headings_at_goal_are_all_collected() {
        // Open 2×2 with zero turn cost: the goal cell is entered facing east
        // or south at the same cost, and turning there costs nothing.
        let r = Racer {
            field: Field::new(2, 2, &[]),
            turn: 0,
        };
        let set = SearchEngine::new(&r)
            .all_shortest_paths(Pose(pt(0, 0), Dir::East), Pose(pt(1, 1), Dir::North))
            .unwrap()
            .unwrap();
        assert_eq!(set.cost, 2);
        let headings: HashSet<Dir> = set.goals.iter().map(|p| p.1).collect();
        assert!(headings.len() >= 2);
        assert!(set.iter().all(|p| p.goal().map(|s| s.0) == Some(pt(1, 1))));
    }

    #[test]
    fn turn_penalty_prefers_fewer_turns() {
        // Corridor with one bend: S . . / . # . / . # G, start facing east.
        let r = Racer {
            field: Field::new(3, 3, &[(1, 1), (1, 2)]),
            turn: 1000,
        };
        let start = Pose(pt(0, 0), Dir::East);
        let goal = Pose(pt(2, 2), Dir::South);
        let d = SearchEngine::new(&r).shortest_distance(start, goal).unwrap();
        assert_eq!(d, Some(1004));
        let d = SearchEngine::astar(&r).shortest_distance(start, goal).unwrap();
        assert_eq!(d, Some(1004));
        let set = SearchEngine::new(&r)
            .all_shortest_paths(start, goal)
            .unwrap()
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.covered(|s| s.0).len(), 5);
    }

    /// `0 -> 1` costs 1; the detour `0 -> 2 -> 3 -> 1` costs 0 + 1 + 0, so
    /// 1 is popped before its second tied parent 3.
    struct FreeDetour;

    impl Pather for FreeDetour {
        type State = u8;
        fn neighbors(&self, s: u8, buf: &mut Vec<u8>) {
            match s {
                0 => buf.extend([1, 2]),
                2 => buf.push(3),
                3 => buf.push(1),
                _ => {}
            }
        }
    }

    impl WeightedPather for FreeDetour {
        fn cost(&self, from: u8, to: u8) -> i32 {
            match (from, to) {
                (0, 2) | (3, 1) => 0,
                _ => 1,
            }
        }
    }

    impl AstarPather for FreeDetour {
        fn estimate(&self, _: u8, _: u8) -> i32 {
            0
        }
    }

    #[test]
    fn zero_cost_tie_into_popped_state_is_kept() {
        for set in [
            SearchEngine::new(&FreeDetour).all_shortest_paths(0, 1),
            SearchEngine::astar(&FreeDetour).all_shortest_paths(0, 1),
        ] {
            let set = set.unwrap().unwrap();
            assert_eq!(set.cost, 1);
            let seqs: Vec<Vec<u8>> = set.iter().map(|p| p.to_vec()).collect();
            assert_eq!(seqs, vec![vec![0, 1], vec![0, 2, 3, 1]]);
        }
    }

    #[test]
    fn free_turns_cover_every_shortest_cell() {
        // 3×3 with a center wall; with free turns both ring halves are
        // optimal, so every open cell lies on a best path.
        let r = Racer {
            field: Field::new(3, 3, &[(1, 1)]),
            turn: 0,
        };
        let (start, goal) = (Pose(pt(0, 0), Dir::North), Pose(pt(2, 2), Dir::North));
        for set in [
            SearchEngine::new(&r).all_shortest_paths(start, goal),
            SearchEngine::astar(&r).all_shortest_paths(start, goal),
        ] {
            let set = set.unwrap().unwrap();
            assert_eq!(set.cost, 4);
            assert_eq!(set.covered(|s| s.0).len(), 8);
            let distinct: HashSet<Vec<Pose>> = set.iter().map(|p| p.to_vec()).collect();
            assert_eq!(distinct.len(), set.len());
            for path in &set {
                let states: HashSet<Pose> = path.iter().copied().collect();
                assert_eq!(states.len(), path.len(), "state repeated in {path:?}");
                let at_goal = path.iter().filter(|s| s.0 == goal.0).count();
                assert_eq!(at_goal, 1, "path continues past the goal: {path:?}");
                let total: i32 = path.windows(2).map(|w| r.cost(w[0], w[1])).sum();
                assert_eq!(total, 4);
            }
        }
    }

    struct Broken;

    impl Pather for Broken {
        type State = u8;
        fn neighbors(&self, s: u8, buf: &mut Vec<u8>) {
            if s < 3 {
                buf.push(s + 1);
            }
        }
    }

    impl WeightedPather for Broken {
        fn cost(&self, from: u8, _: u8) -> i32 {
            if from == 1 { -4 } else { 1 }
        }
    }

    impl AstarPather for Broken {
        fn estimate(&self, from: u8, _: u8) -> i32 {
            -(from as i32)
        }
    }

    #[test]
    fn negative_cost_is_rejected() {
        let err = SearchEngine::new(&Broken).shortest_distance(0, 3).unwrap_err();
        assert_eq!(
            err,
            SearchError::NegativeCost {
                from: "1".into(),
                to: "2".into(),
                cost: -4,
            }
        );
        assert!(err.is_invalid_adapter());
    }

    #[test]
    fn negative_estimate_is_rejected() {
        // Start estimate is 0; the first successor's is -1.
        let err = SearchEngine::astar(&Broken).shortest_distance(0, 3).unwrap_err();
        assert!(matches!(err, SearchError::NegativeEstimate { estimate: -1, .. }));
    }

    #[test]
    fn expansion_limit_stops_runaway_search() {
        let f = Field::new(50, 50, &[]);
        let mut e = SearchEngine::new(&f).with_config(SearchConfig::new().with_max_expansions(20));
        let err = e.shortest_distance(pt(0, 0), pt(49, 49)).unwrap_err();
        assert_eq!(err, SearchError::ExpansionLimit { limit: 20 });
        // Small queries still fit.
        assert_eq!(e.shortest_distance(pt(0, 0), pt(1, 0)).unwrap(), Some(1));
    }
}
