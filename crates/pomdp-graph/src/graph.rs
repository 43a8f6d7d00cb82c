#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pomdp_core::policy::check_dimensions;
use pomdp_core::{PolicyError, Result};

use crate::{Node, NodeAction};

/// Horizon-indexed store of decision nodes.
///
/// `levels[h]` holds the nodes usable when `h` decisions remain; a node's id is its position in
/// its level. The graph is validated once on construction and never mutated afterwards, so it can
/// be shared freely across threads.
///
/// A stationary graph has a single level whose continuations point back into that same level; it
/// stands in for every horizon.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGraph", into = "RawGraph"))]
pub struct PolicyGraph {
    states: usize,
    actions: usize,
    observations: usize,
    levels: Vec<Vec<Node>>,
    stationary: bool,
}

impl PolicyGraph {
    /// The uniform-random policy: a stationary level holding one tied, self-looping node.
    pub fn uniform(states: usize, actions: usize, observations: usize) -> Result<Self> {
        check_dimensions(states, actions, observations)?;
        Self::stationary(
            states,
            actions,
            observations,
            vec![Node::uniform(states, observations)],
        )
    }

    /// Builds a single-level graph used at every horizon.
    ///
    /// Each node's continuation must name a node of `level` itself for every observation.
    pub fn stationary(
        states: usize,
        actions: usize,
        observations: usize,
        level: Vec<Node>,
    ) -> Result<Self> {
        Self::build(states, actions, observations, vec![level], true)
    }

    /// Builds a graph from solver output for levels `0..=H`.
    pub fn from_levels(
        states: usize,
        actions: usize,
        observations: usize,
        levels: Vec<Vec<Node>>,
    ) -> Result<Self> {
        Self::build(states, actions, observations, levels, false)
    }

    fn build(
        states: usize,
        actions: usize,
        observations: usize,
        levels: Vec<Vec<Node>>,
        stationary: bool,
    ) -> Result<Self> {
        check_dimensions(states, actions, observations)?;
        validate_levels(states, actions, observations, &levels, stationary)?;

        tracing::debug!(
            states,
            actions,
            observations,
            max_horizon = levels.len() - 1,
            nodes = levels.iter().map(Vec::len).sum::<usize>(),
            stationary,
            "built policy graph"
        );

        Ok(Self {
            states,
            actions,
            observations,
            levels,
            stationary,
        })
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    /// The highest horizon `H` the graph was built for.
    pub fn max_horizon(&self) -> usize {
        self.levels.len() - 1
    }

    /// Number of nodes at `horizon`, or 0 past `H`.
    pub fn node_count(&self, horizon: usize) -> usize {
        self.levels.get(horizon).map_or(0, Vec::len)
    }

    pub fn level(&self, horizon: usize) -> Option<&[Node]> {
        self.levels.get(horizon).map(Vec::as_slice)
    }

    pub fn node(&self, horizon: usize, id: usize) -> Option<&Node> {
        self.levels.get(horizon)?.get(id)
    }

    pub fn levels(&self) -> &[Vec<Node>] {
        &self.levels
    }

    /// Whether the single level loops onto itself instead of stepping down.
    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    /// Level used when `horizon` decisions remain.
    ///
    /// Horizons 0 and 1 both mean "last decision" and resolve to level 1; anything beyond `H`
    /// clamps to `H`.
    pub fn resolve_level(&self, horizon: usize) -> usize {
        horizon.max(1).min(self.max_horizon())
    }
}

fn malformed(horizon: usize, node: usize, reason: String) -> PolicyError {
    PolicyError::MalformedGraph {
        horizon,
        node,
        reason,
    }
}

fn validate_levels(
    states: usize,
    actions: usize,
    observations: usize,
    levels: &[Vec<Node>],
    stationary: bool,
) -> Result<()> {
    if levels.is_empty() {
        return Err(malformed(0, 0, "policy has no horizon levels".into()));
    }

    for (h, level) in levels.iter().enumerate() {
        if level.is_empty() {
            return Err(malformed(h, 0, "level has no nodes".into()));
        }

        for (id, node) in level.iter().enumerate() {
            if node.alpha.len() != states {
                return Err(malformed(
                    h,
                    id,
                    format!("alpha has {} entries, expected {}", node.alpha.len(), states),
                ));
            }
            if let Some(s) = node.alpha.iter().position(|v| !v.is_finite()) {
                return Err(malformed(
                    h,
                    id,
                    format!("alpha entry for state {s} is not finite"),
                ));
            }
            if let NodeAction::Act(a) = node.action {
                if a >= actions {
                    return Err(malformed(
                        h,
                        id,
                        format!("action {a} out of range ({actions} actions)"),
                    ));
                }
            }

            // Level 0 has nowhere to continue to unless it loops onto itself.
            if h == 0 && !stationary {
                continue;
            }

            if node.continuation.len() != observations {
                return Err(malformed(
                    h,
                    id,
                    format!(
                        "continuation has {} entries, expected {}",
                        node.continuation.len(),
                        observations
                    ),
                ));
            }
            let target = if stationary { h } else { h - 1 };
            let below = levels[target].len();
            if let Some((o, next)) = node
                .continuation
                .iter()
                .enumerate()
                .find(|&(_, &next)| next >= below)
            {
                return Err(malformed(
                    h,
                    id,
                    format!(
                        "observation {o} continues to node {next}, but level {target} has {below} nodes"
                    ),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawGraph {
    states: usize,
    actions: usize,
    observations: usize,
    levels: Vec<Vec<Node>>,
    #[serde(default)]
    stationary: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGraph> for PolicyGraph {
    type Error = PolicyError;

    fn try_from(raw: RawGraph) -> Result<Self> {
        if raw.stationary && raw.levels.len() != 1 {
            return Err(malformed(
                0,
                0,
                format!(
                    "stationary policy has {} levels, expected 1",
                    raw.levels.len()
                ),
            ));
        }
        Self::build(
            raw.states,
            raw.actions,
            raw.observations,
            raw.levels,
            raw.stationary,
        )
    }
}

#[cfg(feature = "serde")]
impl From<PolicyGraph> for RawGraph {
    fn from(graph: PolicyGraph) -> Self {
        Self {
            states: graph.states,
            actions: graph.actions,
            observations: graph.observations,
            levels: graph.levels,
            stationary: graph.stationary,
        }
    }
}
