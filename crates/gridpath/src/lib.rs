//! Best-first shortest-path search over grid-like state spaces.
//!
//! The engine drives a caller-supplied adapter (the [`Pather`] trait family)
//! and offers:
//!
//! - **Exact distance** with Dijkstra or A* ([`SearchEngine::shortest_distance`])
//! - **Bounded search** that never enqueues states above a cost ceiling
//!   ([`SearchEngine::shortest_distance_bounded`])
//! - **Every tied optimal path**, including tied goal states such as one cell
//!   entered with different headings ([`SearchEngine::all_shortest_paths`])
//! - **Reachability maps** from one or more sources, weighted
//!   ([`SearchEngine::reachable_from`]) or unweighted ([`bfs_reachable`]), and
//!   detour counting between two such maps ([`ReachMap::count_detours`])
//!
//! An unreachable goal is reported as `None`. [`SearchError`] is reserved for
//! adapters that break their contract (negative costs or estimates, runaway
//! enumeration).
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS reachability |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra, weighted reachability |
//! | [`AstarPather`] : [`WeightedPather`] | A* ([`SearchEngine::astar`]) |
//!
//! # Logging
//!
//! Search summaries are emitted at `debug` level and per-expansion events at
//! `trace` level through the [`log`] facade. Install any `log` backend to see
//! them.

mod config;
mod distance;
mod engine;
mod error;
mod frontier;
mod reach;
mod reconstruct;
mod search;
mod traits;

pub use config::SearchConfig;
pub use distance::manhattan;
pub use engine::{Admissible, Heuristic, SearchEngine, Uniform};
pub use error::{FrontierError, SearchError};
pub use frontier::Frontier;
pub use reach::{ReachMap, bfs_reachable};
pub use reconstruct::{Path, PathSet, Predecessors};
pub use traits::{AstarPather, Pather, WeightedPather};
