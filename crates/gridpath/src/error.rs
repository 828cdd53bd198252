//! Typed errors for frontier misuse and adapter contract violations.
//!
//! An unreachable goal is not an error: queries report it as `None`.

/// Misuse of the [`Frontier`](crate::Frontier) API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontierError {
    #[error("state {state} is not queued")]
    NotQueued { state: String },
    #[error("cannot raise priority of {state} from {current} to {requested}")]
    PriorityNotLower {
        state: String,
        current: i32,
        requested: i32,
    },
}

/// Fatal failure of a search invocation.
///
/// Every variant except [`Frontier`](Self::Frontier) means the adapter broke
/// its contract. Searches are deterministic, so none of these are worth
/// retrying with the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("adapter returned negative cost {cost} for {from} -> {to}")]
    NegativeCost { from: String, to: String, cost: i32 },
    #[error("adapter returned negative estimate {estimate} at {state}")]
    NegativeEstimate { state: String, estimate: i32 },
    #[error("cost overflow relaxing {from} -> {to}")]
    CostOverflow { from: String, to: String },
    #[error("search expanded more than {limit} states")]
    ExpansionLimit { limit: usize },
    #[error(transparent)]
    Frontier(#[from] FrontierError),
}

impl SearchError {
    /// Whether the error is a state-space adapter contract violation, as
    /// opposed to an internal frontier invariant failure.
    pub fn is_invalid_adapter(&self) -> bool {
        !matches!(self, Self::Frontier(_))
    }
}
