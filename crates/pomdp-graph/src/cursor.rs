use pomdp_core::{Belief, DeterministicRng, PolicyError, Result};

use crate::{GraphPolicy, Sample};

/// Walks a [`GraphPolicy`] through one episode using the continuation protocol.
///
/// The cursor keeps the last handle and the number of decisions remaining, so callers only feed
/// observations:
///
/// ```
/// use pomdp_core::{Belief, SplitMix64};
/// use pomdp_graph::{GraphPolicy, PolicyCursor};
///
/// let policy = GraphPolicy::uniform(2, 2, 2).unwrap();
/// let belief = Belief::uniform(2).unwrap();
/// let mut rng = SplitMix64::new(0);
///
/// let cursor = PolicyCursor::start(&policy, &belief, 0, &mut rng).unwrap();
/// assert!(cursor.action() < 2);
/// ```
#[derive(Debug, Clone)]
pub struct PolicyCursor<'a> {
    policy: &'a GraphPolicy,
    horizon: usize,
    current: Sample,
}

impl<'a> PolicyCursor<'a> {
    /// Scores `belief` once with `horizon` decisions remaining.
    pub fn start(
        policy: &'a GraphPolicy,
        belief: &Belief,
        horizon: usize,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self> {
        let current = policy.sample_action_at(belief, horizon, rng)?;
        Ok(Self {
            policy,
            horizon,
            current,
        })
    }

    pub fn action(&self) -> usize {
        self.current.action
    }

    pub fn current(&self) -> Sample {
        self.current
    }

    /// Decisions remaining, counting the current one.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Whether [`Self::step`] can follow the graph without a fresh belief.
    ///
    /// False once the episode is over, and when the start horizon was clamped to the graph's
    /// top level (the handle then sits lower than the remaining horizon). A stationary graph
    /// continues until the horizon runs out.
    pub fn can_continue(&self) -> bool {
        self.horizon >= 1
            && (self.policy.graph().is_stationary()
                || self.current.continuation.level() == self.horizon)
    }

    /// Advances one step after `observation`, without scoring.
    pub fn step(&mut self, observation: usize, rng: &mut dyn DeterministicRng) -> Result<usize> {
        let from = self.current.continuation;
        let next_horizon = self
            .horizon
            .checked_sub(1)
            .ok_or(PolicyError::InvalidContinuation {
                level: from.level(),
                node: from.node(),
                horizon: 0,
            })?;

        self.current = self
            .policy
            .sample_continuation(from, observation, next_horizon, rng)?;
        self.horizon = next_horizon;
        Ok(self.current.action)
    }

    /// Drops the handle and re-scores at the current horizon with an updated belief.
    pub fn rescore(&mut self, belief: &Belief, rng: &mut dyn DeterministicRng) -> Result<usize> {
        self.current = self.policy.sample_action_at(belief, self.horizon, rng)?;
        Ok(self.current.action)
    }
}
