//! Per-enemy mutable state shared by the tree leaves.

use glam::Vec3;

/// Whether a seek is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    /// No movement command issued
    #[default]
    Idle,
    /// A destination was issued and is being walked to
    Working,
}

/// State the leaves read and write between ticks
#[derive(Debug, Clone, PartialEq)]
pub struct CombatState {
    /// One per enemy, shared by every seek regardless of the calling leaf
    pub action_state: ActionState,
    /// Seconds until the next attack may fire
    pub cooldown: f32,
    /// Wander target on the enemy's local ground plane
    pub wander_target: Vec3,
}

impl CombatState {
    /// Fresh state with the full cooldown pending
    pub fn new(initial_cooldown: f32) -> Self {
        Self {
            action_state: ActionState::Idle,
            cooldown: initial_cooldown,
            wander_target: Vec3::ZERO,
        }
    }

    /// Count the cooldown down by `delta` seconds, stopping at zero
    pub fn countdown(&mut self, delta: f32) {
        self.cooldown = (self.cooldown - delta).max(0.0);
    }

    /// Whether an attack may fire this tick
    pub fn attack_ready(&self) -> bool {
        self.cooldown <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_stops_at_zero() {
        let mut state = CombatState::new(0.5);
        assert!(!state.attack_ready());

        state.countdown(0.3);
        assert!((state.cooldown - 0.2).abs() < 1e-6);

        state.countdown(1.0);
        assert_eq!(state.cooldown, 0.0);
        assert!(state.attack_ready());
    }
}
