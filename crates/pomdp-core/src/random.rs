use crate::policy::{check_action, check_belief, check_dimensions};
use crate::{Belief, DeterministicRng, Policy, Result};

/// Picks every action with the same probability, whatever the belief.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPolicy {
    states: usize,
    actions: usize,
    observations: usize,
}

impl RandomPolicy {
    pub fn new(states: usize, actions: usize, observations: usize) -> Result<Self> {
        check_dimensions(states, actions, observations)?;
        Ok(Self {
            states,
            actions,
            observations,
        })
    }
}

impl Policy for RandomPolicy {
    fn states(&self) -> usize {
        self.states
    }

    fn actions(&self) -> usize {
        self.actions
    }

    fn observations(&self) -> usize {
        self.observations
    }

    fn sample_action(&self, belief: &Belief, rng: &mut dyn DeterministicRng) -> Result<usize> {
        check_belief(belief, self.states)?;
        Ok(rng.next_index(self.actions))
    }

    fn action_probability(&self, belief: &Belief, action: usize) -> Result<f64> {
        check_belief(belief, self.states)?;
        check_action(action, self.actions)?;
        Ok(1.0 / self.actions as f64)
    }
}
