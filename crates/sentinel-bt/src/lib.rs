//! Sentinel BT - Behavior tree engine for real-time agents
//!
//! Trees are evaluated once per simulation tick. A node that needs more than
//! one tick returns [`TreeStatus::Running`] and is resumed on the next tick;
//! composites remember which child is running through a cursor.
//!
//! - [`Node`]: evaluation contract shared by every node kind
//! - [`Sequence`] (AND) and [`Selector`] (OR) composites
//! - [`Leaf`]: wraps a decision/action function
//! - [`BehaviorTree`]: owns the root and drives one evaluation per tick

pub mod builder;
pub mod composite;
pub mod leaf;
pub mod node;
pub mod status;
pub mod tree;

pub use builder::{leaf, selector, sequence};
pub use composite::{Selector, Sequence};
pub use leaf::Leaf;
pub use node::Node;
pub use status::TreeStatus;
pub use tree::BehaviorTree;
