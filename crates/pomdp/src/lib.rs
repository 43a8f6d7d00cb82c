//! Umbrella crate that re-exports the `pomdp-*` building blocks.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use pomdp_core as core;

#[cfg(feature = "graph")]
#[cfg_attr(docsrs, doc(cfg(feature = "graph")))]
pub use pomdp_graph as graph;

#[cfg(all(feature = "core", feature = "graph"))]
pub mod prelude {
    pub use pomdp_core::{Belief, DeterministicRng, Policy, PolicyError, RandomPolicy, SplitMix64};
    pub use pomdp_graph::{
        ContinuationId, GraphPolicy, Node, NodeAction, PolicyCursor, PolicyGraph, Sample,
        SelectorConfig,
    };
}
