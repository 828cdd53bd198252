use std::fmt::Debug;
use std::hash::Hash;

/// Minimal search interface: names the state type and enumerates successors.
///
/// This is the state-space adapter the engine drives. Implementations must
/// be pure: the same state yields the same successors on every call.
pub trait Pather {
    /// A node of the search space, e.g. a `Point` or a position plus heading.
    type State: Copy + Eq + Hash + Debug;

    /// Append successors of `s` into `buf`. The caller clears `buf` before
    /// calling.
    fn neighbors(&self, s: Self::State, buf: &mut Vec<Self::State>);

    /// Whether `s` satisfies the query target `goal`.
    ///
    /// Defaults to equality. Override it when several states share one
    /// physical goal, such as every heading on the exit cell.
    fn is_goal(&self, s: Self::State, goal: Self::State) -> bool {
        s == goal
    }
}

/// Pather with weighted edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to its successor `to`. Must be ≥ 0.
    fn cost(&self, from: Self::State, to: Self::State) -> i32;
}

/// Weighted pather with an admissible heuristic, enabling A*.
pub trait AstarPather: WeightedPather {
    /// Estimate of the remaining cost from `from` to `goal`.
    /// Must be ≥ 0 and never overestimate the true cost.
    fn estimate(&self, from: Self::State, goal: Self::State) -> i32;
}
