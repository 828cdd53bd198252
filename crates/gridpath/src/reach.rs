//! Reachability maps: distance from one or more sources to every reachable
//! state, without parent tracking.

use std::collections::hash_map;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::SearchEngine;
use crate::engine::Heuristic;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::traits::{Pather, WeightedPather};

/// Distance from the nearest source to each reached state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachMap<S: Eq + Hash> {
    dist: HashMap<S, i32>,
}

impl<S: Copy + Eq + Hash> ReachMap<S> {
    /// Distance to `s`, or `None` if it was not reached.
    #[inline]
    pub fn get(&self, s: &S) -> Option<i32> {
        self.dist.get(s).copied()
    }

    #[inline]
    pub fn contains(&self, s: &S) -> bool {
        self.dist.contains_key(s)
    }

    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    /// `(state, distance)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (S, i32)> + '_ {
        self.dist.iter().map(|(&s, &d)| (s, d))
    }

    /// Pairs `(a, b, total)` with `a` in `self`, `b` in `other`, and
    /// `self[a] + transition(a, b) + other[b] ≤ budget`.
    ///
    /// `transition` returns `None` for pairs that cannot be joined. With
    /// `self` measured from one anchor and `other` from another, this
    /// enumerates every detour through a single `a → b` shortcut without
    /// re-running a search per pair. O(|self| · |other|).
    pub fn detour_pairs(
        &self,
        other: &ReachMap<S>,
        budget: i32,
        mut transition: impl FnMut(S, S) -> Option<i32>,
    ) -> Vec<(S, S, i32)> {
        let mut out = Vec::new();
        for (&a, &da) in &self.dist {
            if da > budget {
                continue;
            }
            for (&b, &db) in &other.dist {
                let Some(t) = transition(a, b) else {
                    continue;
                };
                let total = da.saturating_add(t).saturating_add(db);
                if total <= budget {
                    out.push((a, b, total));
                }
            }
        }
        out
    }

    /// Number of [`detour_pairs`](Self::detour_pairs) within `budget`.
    pub fn count_detours(
        &self,
        other: &ReachMap<S>,
        budget: i32,
        mut transition: impl FnMut(S, S) -> Option<i32>,
    ) -> usize {
        let mut n = 0;
        for (&a, &da) in &self.dist {
            if da > budget {
                continue;
            }
            for (&b, &db) in &other.dist {
                if let Some(t) = transition(a, b) {
                    if da.saturating_add(t).saturating_add(db) <= budget {
                        n += 1;
                    }
                }
            }
        }
        n
    }
}

impl<'a, S: Copy + Eq + Hash> IntoIterator for &'a ReachMap<S> {
    type Item = (&'a S, &'a i32);
    type IntoIter = hash_map::Iter<'a, S, i32>;
    fn into_iter(self) -> Self::IntoIter {
        self.dist.iter()
    }
}

/// Unweighted multi-source breadth-first reachability.
///
/// Every step costs 1. States farther than `max_dist` are not expanded.
/// Sources all start at distance 0; duplicates are ignored.
pub fn bfs_reachable<P: Pather>(
    pather: &P,
    sources: &[P::State],
    max_dist: Option<i32>,
) -> ReachMap<P::State> {
    let mut dist: HashMap<P::State, i32> = HashMap::new();
    let mut queue: VecDeque<P::State> = VecDeque::new();

    if max_dist.is_none_or(|m| m >= 0) {
        for &src in sources {
            if let hash_map::Entry::Vacant(e) = dist.entry(src) {
                e.insert(0);
                queue.push_back(src);
            }
        }
    }

    let mut nbuf = Vec::with_capacity(8);
    while let Some(cur) = queue.pop_front() {
        let nd = dist[&cur] + 1;
        if max_dist.is_some_and(|m| nd > m) {
            continue;
        }
        nbuf.clear();
        pather.neighbors(cur, &mut nbuf);
        for &next in nbuf.iter() {
            if let hash_map::Entry::Vacant(e) = dist.entry(next) {
                e.insert(nd);
                queue.push_back(next);
            }
        }
    }

    log::debug!("bfs from {} source(s) reached {} state(s)", sources.len(), dist.len());
    ReachMap { dist }
}

impl<'a, P: WeightedPather, H: Heuristic<P>> SearchEngine<'a, P, H> {
    /// Weighted distance from `source` to every reachable state, limited by
    /// the configured cost ceiling if one is set.
    pub fn reachable_from(
        &mut self,
        source: P::State,
    ) -> Result<ReachMap<P::State>, SearchError> {
        let max_cost = self.config.max_cost;
        self.reachable_from_all(&[source], max_cost)
    }

    /// Multi-source Dijkstra reachability. States whose cumulative cost
    /// would exceed `max_cost` are left out; `None` is unbounded even when
    /// the engine has a configured ceiling. No heuristic is used.
    pub fn reachable_from_all(
        &mut self,
        sources: &[P::State],
        max_cost: Option<i32>,
    ) -> Result<ReachMap<P::State>, SearchError> {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let result = self.dijkstra_map(&mut nbuf, sources, max_cost);
        self.nbuf = nbuf;
        result
    }

    fn dijkstra_map(
        &self,
        nbuf: &mut Vec<P::State>,
        sources: &[P::State],
        max_cost: Option<i32>,
    ) -> Result<ReachMap<P::State>, SearchError> {
        let mut best: HashMap<P::State, i32> = HashMap::new();
        let mut dist: HashMap<P::State, i32> = HashMap::new();
        let mut open = Frontier::new();

        if max_cost.is_none_or(|m| m >= 0) {
            for &src in sources {
                if open.push(src, 0) {
                    best.insert(src, 0);
                }
            }
        }

        while let Some((cur, g)) = open.pop_min() {
            dist.insert(cur, g);
            self.check_expansions(dist.len())?;

            nbuf.clear();
            self.pather.neighbors(cur, nbuf);
            for &next in nbuf.iter() {
                if dist.contains_key(&next) {
                    continue;
                }
                let step = self.step_cost(cur, next)?;
                let tentative = Self::add_cost(g, step, cur, next)?;
                if max_cost.is_some_and(|m| tentative > m) {
                    continue;
                }
                match best.get(&next).copied() {
                    Some(old) if tentative >= old => {}
                    Some(_) => {
                        best.insert(next, tentative);
                        open.decrease_priority(next, tentative)?;
                    }
                    None => {
                        best.insert(next, tentative);
                        open.push(next, tentative);
                    }
                }
            }
        }

        log::debug!(
            "dijkstra from {} source(s) reached {} state(s)",
            sources.len(),
            dist.len()
        );
        Ok(ReachMap { dist })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use gridpath_core::{Point, Range};

    use crate::{SearchConfig, manhattan};

    use super::*;

    struct Field {
        rng: Range,
        walls: HashSet<Point>,
        /// Extra cost for entering cells with `x == 2`.
        mud: i32,
    }

    impl Pather for Field {
        type State = Point;
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for n in p.neighbors_4() {
                if self.rng.contains(n) && !self.walls.contains(&n) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for Field {
        fn cost(&self, _: Point, to: Point) -> i32 {
            if to.x == 2 { 1 + self.mud } else { 1 }
        }
    }

    fn field(w: i32, h: i32, walls: &[(i32, i32)], mud: i32) -> Field {
        Field {
            rng: Range::new(0, 0, w, h),
            walls: walls.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            mud,
        }
    }

    #[test]
    fn bfs_matches_manhattan_on_open_grid() {
        let f = field(5, 4, &[], 0);
        let m = bfs_reachable(&f, &[Point::ZERO], None);
        assert_eq!(m.len(), 20);
        for (p, d) in m.iter() {
            assert_eq!(d, manhattan(p, Point::ZERO));
        }
    }

    #[test]
    fn bfs_respects_cap_and_walls() {
        let f = field(5, 5, &[(1, 0), (1, 1), (1, 2), (1, 3)], 0);
        let m = bfs_reachable(&f, &[Point::ZERO], Some(3));
        assert_eq!(m.get(&Point::new(0, 3)), Some(3));
        assert_eq!(m.get(&Point::new(0, 4)), None);
        assert!(!m.contains(&Point::new(2, 0)));
        assert!(m.iter().all(|(_, d)| d <= 3));
        assert!(bfs_reachable(&f, &[Point::ZERO], Some(-1)).is_empty());
    }

    #[test]
    fn multi_source_takes_nearest() {
        let f = field(7, 1, &[], 0);
        let m = bfs_reachable(&f, &[Point::new(0, 0), Point::new(6, 0)], None);
        assert_eq!(m.get(&Point::new(3, 0)), Some(3));
        assert_eq!(m.get(&Point::new(5, 0)), Some(1));

        let mut e = SearchEngine::new(&f);
        let w = e
            .reachable_from_all(&[Point::new(0, 0), Point::new(6, 0)], None)
            .unwrap();
        assert_eq!(w, m);
    }

    #[test]
    fn weighted_map_agrees_with_point_queries() {
        let f = field(5, 5, &[(3, 1), (3, 2), (3, 3)], 4);
        let mut e = SearchEngine::new(&f);
        let m = e.reachable_from(Point::ZERO).unwrap();
        assert_eq!(m.len(), 22);
        for (p, d) in m.iter() {
            assert_eq!(e.shortest_distance(Point::ZERO, p).unwrap(), Some(d));
        }
        // Crossing the mud column costs 5 instead of 1.
        assert_eq!(m.get(&Point::new(2, 0)), Some(6));
    }

    #[test]
    fn weighted_map_cap() {
        let f = field(6, 1, &[], 0);
        let mut e = SearchEngine::new(&f).with_config(SearchConfig::new().with_max_cost(2));
        let m = e.reachable_from(Point::ZERO).unwrap();
        assert_eq!(m.len(), 3);
        let m = e.reachable_from_all(&[Point::ZERO], Some(4)).unwrap();
        assert_eq!(m.len(), 5);
        // An explicit unbounded request ignores the configured ceiling.
        let m = e.reachable_from_all(&[Point::ZERO], None).unwrap();
        assert_eq!(m.len(), 6);
        assert_eq!(m.get(&Point::new(5, 0)), Some(5));
    }

    #[test]
    fn detour_counting_through_one_shortcut() {
        // A wall separates S from E; the two maps are joined by jumps of
        // Manhattan length ≤ 2.
        //   S # E
        //   . # .
        //   . . .
        let f = field(3, 3, &[(1, 0), (1, 1)], 0);
        let (s, g) = (Point::new(0, 0), Point::new(2, 0));
        let from_start = bfs_reachable(&f, &[s], None);
        let from_end = bfs_reachable(&f, &[g], None);
        let honest = from_start.get(&g).unwrap();
        assert_eq!(honest, 6);

        let jump = |a: Point, b: Point| {
            let d = manhattan(a, b);
            (d <= 2).then_some(d)
        };
        // Only the direct two-step jump S -> E over the wall saves 4.
        let pairs = from_start.detour_pairs(&from_end, honest - 4, jump);
        assert_eq!(pairs, vec![(s, g, 2)]);
        assert_eq!(from_start.count_detours(&from_end, honest - 4, jump), 1);
        // Budget equal to the honest length admits every pair joining
        // cells on the honest path with a non-worse jump.
        let n = from_start.count_detours(&from_end, honest, jump);
        assert!(n > 1);
        assert_eq!(n, from_start.detour_pairs(&from_end, honest, jump).len());
    }
}
