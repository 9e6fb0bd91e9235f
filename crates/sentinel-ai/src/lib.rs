//! Sentinel AI - Enemy decision making
//!
//! An enemy picks, once per tick, between closing in for a melee strike,
//! shooting from range and wandering about. Decisions are made by a behavior
//! tree whose leaves live here; movement and physics are reached through the
//! [`Navigator`] and [`CombatWorld`] traits.

pub mod brain;
pub mod combat;
pub mod config;
pub mod context;
pub mod navigation;
pub mod seek;
pub mod state;
pub mod steering;

#[cfg(test)]
mod test_support;

pub use brain::{build_enemy_tree, Enemy};
pub use config::{ConfigError, EnemyConfig};
pub use context::{CombatWorld, EnemyContext, Navigator, TargetSnapshot};
pub use navigation::{GroundNavigator, NavigatorConfig};
pub use state::{ActionState, CombatState};
