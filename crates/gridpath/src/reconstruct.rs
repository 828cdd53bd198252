//! Multi-parent predecessor graph and path enumeration.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Deref;

/// A state sequence from start to goal. Built only by [`Predecessors`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path<S>(Vec<S>);

impl<S: Copy> Path<S> {
    /// First state of the path.
    pub fn start(&self) -> Option<S> {
        self.0.first().copied()
    }

    /// Last state of the path.
    pub fn goal(&self) -> Option<S> {
        self.0.last().copied()
    }

    /// Number of transitions (one less than the number of states).
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn into_vec(self) -> Vec<S> {
        self.0
    }
}

impl<S> Deref for Path<S> {
    type Target = [S];
    fn deref(&self) -> &[S] {
        &self.0
    }
}

/// Best-parent table of a finished search: for each state, the ordered
/// predecessors that reach it at its minimum cost.
///
/// States without an entry (the start) are path roots. First parents are
/// always finalized before their child, so following them terminates. Later
/// tied parents may close cycles through zero-cost steps; enumeration only
/// follows simple paths.
#[derive(Debug, Clone, Default)]
pub struct Predecessors<S> {
    parents: HashMap<S, Vec<S>>,
}

impl<S: Copy + Eq + Hash> Predecessors<S> {
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    /// Record `parents` as the tied best predecessors of `state`.
    pub fn insert(&mut self, state: S, parents: Vec<S>) {
        if parents.is_empty() {
            self.parents.remove(&state);
        } else {
            self.parents.insert(state, parents);
        }
    }

    /// Tied best predecessors of `state`; empty for a root.
    pub fn parents(&self, state: &S) -> &[S] {
        self.parents.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of states with at least one recorded predecessor.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// The path obtained by always following the first recorded parent.
    pub fn first_path_to(&self, goal: S) -> Path<S> {
        let mut rev = vec![goal];
        let mut cur = goal;
        while let Some(&p) = self.parents(&cur).first() {
            if rev.contains(&p) {
                break;
            }
            rev.push(p);
            cur = p;
        }
        rev.reverse();
        Path(rev)
    }

    /// Every distinct root-to-goal sequence through the predecessor graph,
    /// for each goal in turn.
    ///
    /// Depth-first: each partial suffix is extended by every parent of its
    /// head, and a suffix whose head has no parents is complete. A parent
    /// already on the suffix is skipped, as is any other member of `goals`:
    /// paths are simple and end at the first goal they reach. Paths come
    /// out in parent order, so results are stable across runs. The count is
    /// exponential in the number of tie points.
    pub fn paths_to(&self, goals: &[S]) -> Vec<Path<S>> {
        let mut out = Vec::new();
        for &goal in goals {
            // Suffixes stored goal-first; reversed once complete.
            let mut stack: Vec<Vec<S>> = vec![vec![goal]];
            while let Some(mut rev) = stack.pop() {
                let Some(&head) = rev.last() else {
                    continue;
                };
                let parents = self.parents(&head);
                if parents.is_empty() {
                    rev.reverse();
                    out.push(Path(rev));
                    continue;
                }
                // Pushed in reverse so the first parent is explored first.
                for &p in parents.iter().rev() {
                    if rev.contains(&p) || goals.contains(&p) {
                        continue;
                    }
                    let mut next = rev.clone();
                    next.push(p);
                    stack.push(next);
                }
            }
        }
        out
    }
}

/// All minimum-cost paths of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet<S> {
    /// Shared cost of every path.
    pub cost: i32,
    /// Goal-matching states reached at `cost`, in pop order.
    pub goals: Vec<S>,
    /// Distinct optimal paths, grouped by goal.
    pub paths: Vec<Path<S>>,
}

impl<S: Copy + Eq + Hash> PathSet<S> {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path<S>> {
        self.paths.iter()
    }

    /// Distinct keys of every state lying on any optimal path, e.g. the set
    /// of cells covered when states carry a heading.
    pub fn covered<K: Eq + Hash>(&self, mut key: impl FnMut(&S) -> K) -> HashSet<K> {
        self.paths.iter().flat_map(|p| p.iter()).map(&mut key).collect()
    }
}

impl<'a, S> IntoIterator for &'a PathSet<S> {
    type Item = &'a Path<S>;
    type IntoIter = std::slice::Iter<'a, Path<S>>;
    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
