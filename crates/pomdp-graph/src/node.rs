#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pomdp_core::Belief;

/// What a node recommends doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeAction {
    /// A single action index in `[0, A)`.
    Act(usize),
    /// Every action tied; probability mass is spread evenly across all `A` actions.
    Uniform,
}

impl NodeAction {
    /// Probability this node assigns to `action` out of `actions` total.
    pub fn probability(self, action: usize, actions: usize) -> f64 {
        match self {
            NodeAction::Act(a) if a == action => 1.0,
            NodeAction::Act(_) => 0.0,
            NodeAction::Uniform => 1.0 / actions as f64,
        }
    }
}

/// One decision alternative at a horizon level.
///
/// `continuation[o]` is the id of the node to follow one level down after taking this node's
/// action and receiving observation `o`. Nodes at level 0 have no successor and their
/// continuation is ignored, except in a stationary graph where it points back into level 0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub alpha: Vec<f64>,
    pub action: NodeAction,
    pub continuation: Vec<usize>,
}

impl Node {
    pub fn new(alpha: Vec<f64>, action: usize, continuation: Vec<usize>) -> Self {
        Self {
            alpha,
            action: NodeAction::Act(action),
            continuation,
        }
    }

    /// A level-0 node: no successor.
    pub fn terminal(alpha: Vec<f64>, action: usize) -> Self {
        Self::new(alpha, action, Vec::new())
    }

    /// Zero alpha, all actions tied, every observation looping back to node 0.
    pub fn uniform(states: usize, observations: usize) -> Self {
        Self {
            alpha: vec![0.0; states],
            action: NodeAction::Uniform,
            continuation: vec![0; observations],
        }
    }

    /// Expected value of this node under `belief`. A NaN score ranks below every other node.
    pub fn score(&self, belief: &Belief) -> f64 {
        let s = belief.dot(&self.alpha);
        if s.is_nan() {
            f64::NEG_INFINITY
        } else {
            s
        }
    }
}
