#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pomdp_core::policy::{check_action, check_belief, check_observation};
use pomdp_core::{Belief, DeterministicRng, Policy, PolicyError, Result};

use crate::select::{winning_set, SelectorConfig, WinningSet};
use crate::{Node, NodeAction, PolicyGraph};

/// Handle to a previously selected node, tagged with the level it was selected at.
///
/// Pass it back to [`GraphPolicy::sample_continuation`] together with the observation received
/// to get the next action without scoring a belief again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContinuationId {
    level: usize,
    node: usize,
}

impl ContinuationId {
    pub fn new(level: usize, node: usize) -> Self {
        Self { level, node }
    }

    pub fn level(self) -> usize {
        self.level
    }

    pub fn node(self) -> usize {
        self.node
    }
}

/// A sampled action and the handle to continue from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    pub action: usize,
    pub continuation: ContinuationId,
}

/// A full finite-horizon policy: a validated [`PolicyGraph`] plus the belief-scored selector.
///
/// Expensive to build, cheap to query. Every query is a read; sampling takes the caller's RNG.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPolicy {
    graph: PolicyGraph,
    config: SelectorConfig,
}

impl GraphPolicy {
    pub fn new(graph: PolicyGraph) -> Self {
        Self {
            graph,
            config: SelectorConfig::default(),
        }
    }

    /// Uniform-random policy: every action equally likely for every belief.
    pub fn uniform(states: usize, actions: usize, observations: usize) -> Result<Self> {
        Ok(Self::new(PolicyGraph::uniform(states, actions, observations)?))
    }

    /// Replaces the selector settings. The tie epsilon must be finite and non-negative.
    pub fn with_config(mut self, config: SelectorConfig) -> Result<Self> {
        let epsilon = config.tie_epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(PolicyError::InvalidTieEpsilon { epsilon });
        }
        self.config = config;
        Ok(self)
    }

    pub fn graph(&self) -> &PolicyGraph {
        &self.graph
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn max_horizon(&self) -> usize {
        self.graph.max_horizon()
    }

    /// Samples at `horizon` decisions remaining.
    ///
    /// Horizons 0 and 1 are equivalent; horizons past the graph's `H` are clamped to `H`. The
    /// returned continuation feeds [`Self::sample_continuation`] at `horizon - 1`.
    pub fn sample_action_at(
        &self,
        belief: &Belief,
        horizon: usize,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Sample> {
        let (level, winners) = self.score(belief, horizon)?;

        let node = winners.nodes[rng.next_index(winners.len())];
        let action = self.pick_action(&self.graph.levels()[level][node], rng);

        Ok(Sample {
            action,
            continuation: ContinuationId::new(level, node),
        })
    }

    /// Continues from a previous sample after receiving `observation`.
    ///
    /// `from` must have been produced at level `horizon + 1`; this is a table lookup with no
    /// belief scoring. A stationary graph takes its level-0 handles at any horizon and continues
    /// within level 0. Anything else is reported as `InvalidContinuation`.
    pub fn sample_continuation(
        &self,
        from: ContinuationId,
        observation: usize,
        horizon: usize,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Sample> {
        check_observation(observation, self.graph.observations())?;

        let invalid = || {
            tracing::warn!(
                level = from.level,
                node = from.node,
                horizon,
                "rejected continuation handle"
            );
            PolicyError::InvalidContinuation {
                level: from.level,
                node: from.node,
                horizon,
            }
        };

        let (expected, target_level) = if self.graph.is_stationary() {
            (Some(0), 0)
        } else {
            (horizon.checked_add(1), horizon)
        };
        if expected != Some(from.level) {
            return Err(invalid());
        }
        let next = self
            .graph
            .node(from.level, from.node)
            .and_then(|n| n.continuation.get(observation).copied())
            .ok_or_else(invalid)?;
        let target = self.graph.node(target_level, next).ok_or_else(invalid)?;

        tracing::trace!(
            level = from.level,
            node = from.node,
            observation,
            next,
            "followed continuation"
        );

        Ok(Sample {
            action: self.pick_action(target, rng),
            continuation: ContinuationId::new(target_level, next),
        })
    }

    /// Probability of choosing `action` under `belief` at `horizon` decisions remaining.
    pub fn action_probability_at(
        &self,
        belief: &Belief,
        action: usize,
        horizon: usize,
    ) -> Result<f64> {
        check_action(action, self.graph.actions())?;
        let (level, winners) = self.score(belief, horizon)?;
        let nodes = &self.graph.levels()[level];

        let actions = self.graph.actions();
        let mass: f64 = winners
            .nodes
            .iter()
            .map(|&id| nodes[id].action.probability(action, actions))
            .sum();
        Ok(mass / winners.len() as f64)
    }

    /// The full action distribution under `belief` at `horizon`; sums to 1.
    pub fn action_distribution(&self, belief: &Belief, horizon: usize) -> Result<Vec<f64>> {
        let (level, winners) = self.score(belief, horizon)?;
        let nodes = &self.graph.levels()[level];

        let actions = self.graph.actions();
        let share = 1.0 / winners.len() as f64;
        let mut dist = vec![0.0; actions];
        for &id in &winners.nodes {
            match nodes[id].action {
                NodeAction::Act(a) => dist[a] += share,
                NodeAction::Uniform => dist.iter_mut().for_each(|p| *p += share / actions as f64),
            }
        }
        Ok(dist)
    }

    /// Best score over the resolved level, i.e. the value of `belief` with `horizon` steps left.
    pub fn value(&self, belief: &Belief, horizon: usize) -> Result<f64> {
        Ok(self.score(belief, horizon)?.1.value)
    }

    /// Ids of the tied-maximal nodes at the resolved level, in level order.
    pub fn winning_set(&self, belief: &Belief, horizon: usize) -> Result<Vec<usize>> {
        Ok(self.score(belief, horizon)?.1.nodes)
    }

    fn score(&self, belief: &Belief, horizon: usize) -> Result<(usize, WinningSet)> {
        check_belief(belief, self.graph.states())?;

        let level = self.graph.resolve_level(horizon);
        let winners = winning_set(&self.graph.levels()[level], belief, &self.config);

        tracing::trace!(
            horizon,
            level,
            winners = winners.len(),
            value = winners.value,
            "scored belief"
        );

        Ok((level, winners))
    }

    fn pick_action(&self, node: &Node, rng: &mut dyn DeterministicRng) -> usize {
        match node.action {
            NodeAction::Act(a) => a,
            NodeAction::Uniform => rng.next_index(self.graph.actions()),
        }
    }
}

impl Policy for GraphPolicy {
    fn states(&self) -> usize {
        self.graph.states()
    }

    fn actions(&self) -> usize {
        self.graph.actions()
    }

    fn observations(&self) -> usize {
        self.graph.observations()
    }

    /// Samples from the highest horizon the graph supports.
    fn sample_action(&self, belief: &Belief, rng: &mut dyn DeterministicRng) -> Result<usize> {
        let horizon = self.graph.max_horizon();
        Ok(self.sample_action_at(belief, horizon, rng)?.action)
    }

    fn action_probability(&self, belief: &Belief, action: usize) -> Result<f64> {
        self.action_probability_at(belief, action, self.graph.max_horizon())
    }
}
