//! Component tree.
//!
//! - [`Tree`] - Arena owning every component of a model
//! - [`NodeId`] / [`NodeRef`] - Handles into the arena
//! - [`Shape`] - Leaf, container, named container or transparent group
//! - [`Descendants`] - Lazy depth-first iteration

mod iter;
mod tree;

pub use iter::Descendants;
pub use tree::{NodeId, NodeRef, Shape, Tree};
