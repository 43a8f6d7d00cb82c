use thiserror::Error;

/// A belief vector rejected at the call boundary.
///
/// Beliefs are never renormalized silently; a vector that fails these checks points at a bug in
/// whatever is tracking the belief upstream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BeliefError {
    #[error("belief has no states")]
    Empty,

    #[error("belief entry for state {state} is not finite")]
    NonFinite { state: usize },

    #[error("belief entry for state {state} is negative ({value})")]
    Negative { state: usize, value: f64 },

    #[error("belief does not sum to 1 (sum={sum})")]
    NotNormalized { sum: f64 },

    #[error("state {state} out of range (belief has {states} states)")]
    StateOutOfRange { state: usize, states: usize },

    #[error("belief tolerance must be finite and non-negative (got {tolerance})")]
    InvalidTolerance { tolerance: f64 },
}

/// Errors reported by policy construction and queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error(
        "invalid policy dimensions: states={states}, actions={actions}, observations={observations} (all must be positive)"
    )]
    InvalidDimensions {
        states: usize,
        actions: usize,
        observations: usize,
    },

    #[error("belief has {actual} states, policy expects {expected}")]
    BeliefLength { expected: usize, actual: usize },

    #[error("invalid belief: {0}")]
    InvalidBelief(#[from] BeliefError),

    #[error("action {action} out of range (policy has {actions} actions)")]
    ActionOutOfRange { action: usize, actions: usize },

    #[error("observation {observation} out of range (policy has {observations} observations)")]
    ObservationOutOfRange {
        observation: usize,
        observations: usize,
    },

    #[error(
        "invalid continuation: node {node} at level {level} cannot be continued at horizon {horizon}"
    )]
    InvalidContinuation {
        level: usize,
        node: usize,
        horizon: usize,
    },

    #[error("tie epsilon must be finite and non-negative (got {epsilon})")]
    InvalidTieEpsilon { epsilon: f64 },

    #[error("malformed policy graph at horizon {horizon}, node {node}: {reason}")]
    MalformedGraph {
        horizon: usize,
        node: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, PolicyError>;
