//! Sentinel Core - Core types and utilities shared by the Sentinel crates
//!
//! This crate provides the foundational types used by the agent AI:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for agent positioning, facing, and bounded turning
//! - Time system supplying the per-tick delta the behavior tree runs on

pub mod time;
pub mod types;

pub use glam::{Mat3, Quat, Vec2, Vec3};
pub use time::{FrameTime, GameTime, TimeConfig};
pub use types::Transform;
