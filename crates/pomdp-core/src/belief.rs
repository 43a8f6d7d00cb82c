#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::BeliefError;

/// Default slack allowed on the sum of a belief and on each entry's sign.
pub const BELIEF_TOLERANCE: f64 = 1e-6;

/// A probability distribution over world states.
///
/// Construction validates the vector once; afterwards a `Belief` is known to be finite,
/// non-negative (within tolerance) and to sum to 1 (within tolerance). The values are stored as
/// given, never renormalized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct Belief {
    values: Vec<f64>,
}

impl Belief {
    pub fn new(values: Vec<f64>) -> Result<Self, BeliefError> {
        Self::with_tolerance(values, BELIEF_TOLERANCE)
    }

    pub fn with_tolerance(values: Vec<f64>, tolerance: f64) -> Result<Self, BeliefError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(BeliefError::InvalidTolerance { tolerance });
        }
        if values.is_empty() {
            return Err(BeliefError::Empty);
        }

        let mut sum = 0.0;
        for (state, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(BeliefError::NonFinite { state });
            }
            if value < -tolerance {
                return Err(BeliefError::Negative { state, value });
            }
            sum += value;
        }

        if (sum - 1.0).abs() > tolerance {
            return Err(BeliefError::NotNormalized { sum });
        }

        Ok(Self { values })
    }

    /// Every state equally likely.
    pub fn uniform(states: usize) -> Result<Self, BeliefError> {
        if states == 0 {
            return Err(BeliefError::Empty);
        }
        let p = 1.0 / states as f64;
        Ok(Self {
            values: vec![p; states],
        })
    }

    /// All mass on `state`.
    pub fn point(states: usize, state: usize) -> Result<Self, BeliefError> {
        if states == 0 {
            return Err(BeliefError::Empty);
        }
        if state >= states {
            return Err(BeliefError::StateOutOfRange { state, states });
        }
        let mut values = vec![0.0; states];
        values[state] = 1.0;
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, state: usize) -> Option<f64> {
        self.values.get(state).copied()
    }

    /// Dot product against a linear functional over states (e.g. an alpha vector).
    ///
    /// Entries past the shorter of the two slices are ignored.
    pub fn dot(&self, alpha: &[f64]) -> f64 {
        self.values.iter().zip(alpha).map(|(b, a)| b * a).sum()
    }
}

impl TryFrom<Vec<f64>> for Belief {
    type Error = BeliefError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<Belief> for Vec<f64> {
    fn from(belief: Belief) -> Self {
        belief.values
    }
}

impl AsRef<[f64]> for Belief {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
