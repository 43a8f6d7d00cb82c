//! Finite-horizon POMDP policy graph.
//!
//! A solver produces, for every horizon level, a pruned set of nodes: an alpha vector, the action
//! it recommends, and for each observation the node to follow one level down. This crate stores
//! that graph and answers queries against it:
//!
//! - score a belief against a level and pick among the tied-maximal nodes uniformly,
//! - report the induced action distribution, which always sums to 1,
//! - continue from a previously chosen node after an observation with a table lookup instead of
//!   a fresh belief scan.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod graph;
pub mod node;
pub mod policy;
pub mod select;

pub use cursor::PolicyCursor;
pub use graph::PolicyGraph;
pub use node::{Node, NodeAction};
pub use policy::{ContinuationId, GraphPolicy, Sample};
pub use select::{SelectorConfig, WinningSet};
