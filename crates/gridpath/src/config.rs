/// Per-engine search limits.
///
/// The default places no ceiling on cost or work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Cost ceiling applied to every query. Successors whose cumulative cost
    /// would exceed it are never enqueued. Explicit `*_bounded` arguments
    /// take precedence.
    pub max_cost: Option<i32>,
    /// Maximum number of states finalized per query before the search fails
    /// with [`SearchError::ExpansionLimit`](crate::SearchError::ExpansionLimit).
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_cost(mut self, max_cost: i32) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
