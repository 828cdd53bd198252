use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Source of the frontier priority offset `h(state)`.
///
/// The engine orders its frontier by `g + h`; this trait selects `h`.
pub trait Heuristic<P: Pather> {
    fn estimate(&self, pather: &P, from: P::State, goal: P::State) -> i32;
}

/// Zero heuristic: plain Dijkstra ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl<P: Pather> Heuristic<P> for Uniform {
    #[inline]
    fn estimate(&self, _: &P, _: P::State, _: P::State) -> i32 {
        0
    }
}

/// The pather's own [`AstarPather::estimate`]: A* ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Admissible;

impl<P: AstarPather> Heuristic<P> for Admissible {
    #[inline]
    fn estimate(&self, pather: &P, from: P::State, goal: P::State) -> i32 {
        pather.estimate(from, goal)
    }
}

/// Central coordinator for searches over one state-space adapter.
///
/// The adapter is borrowed for the engine's lifetime; everything a query
/// mutates (frontier, cost and parent tables) is created per call and
/// dropped when the result is returned. Only the neighbour scratch buffer
/// is reused across calls.
///
/// ```
/// use gridpath::{Pather, SearchEngine, WeightedPather};
///
/// // A line of states 0..10 with unit steps.
/// struct Line;
/// impl Pather for Line {
///     type State = i32;
///     fn neighbors(&self, s: i32, buf: &mut Vec<i32>) {
///         buf.extend([s - 1, s + 1].into_iter().filter(|n| (0..10).contains(n)));
///     }
/// }
/// impl WeightedPather for Line {
///     fn cost(&self, _: i32, _: i32) -> i32 {
///         1
///     }
/// }
///
/// let mut engine = SearchEngine::new(&Line);
/// assert_eq!(engine.shortest_distance(2, 7).unwrap(), Some(5));
/// assert_eq!(engine.shortest_distance_bounded(2, 7, 4).unwrap(), None);
/// ```
pub struct SearchEngine<'a, P: Pather, H = Uniform> {
    pub(crate) pather: &'a P,
    pub(crate) heuristic: H,
    pub(crate) config: SearchConfig,
    pub(crate) nbuf: Vec<P::State>,
}

impl<'a, P: WeightedPather> SearchEngine<'a, P, Uniform> {
    /// Engine running Dijkstra (no heuristic).
    pub fn new(pather: &'a P) -> Self {
        Self::with_heuristic(pather, Uniform)
    }
}

impl<'a, P: AstarPather> SearchEngine<'a, P, Admissible> {
    /// Engine running A* with the pather's estimate.
    pub fn astar(pather: &'a P) -> Self {
        Self::with_heuristic(pather, Admissible)
    }
}

impl<'a, P: WeightedPather, H: Heuristic<P>> SearchEngine<'a, P, H> {
    /// Engine using a custom frontier heuristic.
    pub fn with_heuristic(pather: &'a P, heuristic: H) -> Self {
        Self {
            pather,
            heuristic,
            config: SearchConfig::default(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Replace the engine's limits.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn pather(&self) -> &'a P {
        self.pather
    }

    /// Heuristic value at `from`, rejecting negative estimates.
    pub(crate) fn estimate(&self, from: P::State, goal: P::State) -> Result<i32, SearchError> {
        let h = self.heuristic.estimate(self.pather, from, goal);
        if h < 0 {
            log::warn!("negative heuristic estimate {h} at {from:?}");
            return Err(SearchError::NegativeEstimate {
                state: format!("{from:?}"),
                estimate: h,
            });
        }
        Ok(h)
    }

    /// Transition cost `from -> to`, rejecting negative costs.
    pub(crate) fn step_cost(&self, from: P::State, to: P::State) -> Result<i32, SearchError> {
        let c = self.pather.cost(from, to);
        if c < 0 {
            log::warn!("negative transition cost {c} for {from:?} -> {to:?}");
            return Err(SearchError::NegativeCost {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
                cost: c,
            });
        }
        Ok(c)
    }

    /// `g + step`, failing on overflow.
    pub(crate) fn add_cost(
        g: i32,
        step: i32,
        from: P::State,
        to: P::State,
    ) -> Result<i32, SearchError> {
        g.checked_add(step).ok_or_else(|| SearchError::CostOverflow {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        })
    }

    /// Fail once `expansions` passes the configured limit.
    pub(crate) fn check_expansions(&self, expansions: usize) -> Result<(), SearchError> {
        match self.config.max_expansions {
            Some(limit) if expansions > limit => {
                log::warn!("search exceeded {limit} expansions");
                Err(SearchError::ExpansionLimit { limit })
            }
            _ => Ok(()),
        }
    }
}
