//! Deterministic, engine-agnostic POMDP policy primitives.
//!
//! Beliefs, the shared `Policy` capability, caller-supplied randomness and the error taxonomy
//! live here. Concrete policy representations (such as the horizon-indexed policy graph) build
//! on top in their own crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod belief;
pub mod error;
pub mod policy;
pub mod random;
pub mod rng;

pub use belief::{Belief, BELIEF_TOLERANCE};
pub use error::{BeliefError, PolicyError, Result};
pub use policy::Policy;
pub use random::RandomPolicy;
pub use rng::{DeterministicRng, SplitMix64};
