use pomdp_core::Belief;

use crate::Node;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    /// Nodes scoring within `tie_epsilon` of the best score are treated as tied with it.
    pub tie_epsilon: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { tie_epsilon: 1e-9 }
    }
}

/// The tied-maximal nodes of one level under a belief.
#[derive(Debug, Clone, PartialEq)]
pub struct WinningSet {
    /// Node ids, in level order.
    pub nodes: Vec<usize>,
    /// Best score over the level.
    pub value: f64,
}

impl WinningSet {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Scores every node of `level` against `belief` and keeps those within epsilon of the best.
///
/// Non-empty whenever `level` is.
pub fn winning_set(level: &[Node], belief: &Belief, config: &SelectorConfig) -> WinningSet {
    let scores: Vec<f64> = level.iter().map(|n| n.score(belief)).collect();
    let value = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let cutoff = value - config.tie_epsilon;

    let nodes = scores
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s >= cutoff)
        .map(|(id, _)| id)
        .collect();

    WinningSet { nodes, value }
}
