use crate::{Belief, DeterministicRng, PolicyError, Result};

/// The capability every POMDP policy representation provides.
///
/// Callers (interaction loops, evaluators) hold `&dyn Policy` or `Box<dyn Policy>` and never the
/// concrete representation, so a precomputed graph and a uniform fallback are interchangeable.
pub trait Policy {
    fn states(&self) -> usize;

    fn actions(&self) -> usize;

    fn observations(&self) -> usize;

    /// Samples an action for `belief` following the policy distribution.
    fn sample_action(&self, belief: &Belief, rng: &mut dyn DeterministicRng) -> Result<usize>;

    /// Probability of choosing `action` under `belief`.
    fn action_probability(&self, belief: &Belief, action: usize) -> Result<f64>;
}

pub fn check_dimensions(states: usize, actions: usize, observations: usize) -> Result<()> {
    if states == 0 || actions == 0 || observations == 0 {
        return Err(PolicyError::InvalidDimensions {
            states,
            actions,
            observations,
        });
    }
    Ok(())
}

pub fn check_belief(belief: &Belief, states: usize) -> Result<()> {
    if belief.len() != states {
        return Err(PolicyError::BeliefLength {
            expected: states,
            actual: belief.len(),
        });
    }
    Ok(())
}

pub fn check_action(action: usize, actions: usize) -> Result<()> {
    if action >= actions {
        return Err(PolicyError::ActionOutOfRange { action, actions });
    }
    Ok(())
}

pub fn check_observation(observation: usize, observations: usize) -> Result<()> {
    if observation >= observations {
        return Err(PolicyError::ObservationOutOfRange {
            observation,
            observations,
        });
    }
    Ok(())
}
