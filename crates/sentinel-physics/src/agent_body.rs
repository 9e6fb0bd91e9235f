//! Kinematic capsule bodies that mirror agents into the physics world.
//!
//! Agents are moved by navigation, not by the solver. Their bodies exist so
//! overlap queries can find them and projectiles can collide with them.

use glam::Vec3;
use rapier3d::prelude::*;

use crate::{convert, layers, PhysicsWorld};

/// Agent body configuration
#[derive(Debug, Clone)]
pub struct AgentBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
}

impl Default for AgentBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
        }
    }
}

/// A capsule collider on a kinematic body, positioned by its center
#[derive(Debug, Clone)]
pub struct AgentBody {
    /// Configuration
    pub config: AgentBodyConfig,
    /// Capsule center
    pub position: Vec3,
    /// Body handle
    pub body: RigidBodyHandle,
    /// Collider handle
    pub collider: ColliderHandle,
}

impl AgentBody {
    /// Spawn an agent body with default dimensions on `layer`
    pub fn spawn(physics: &mut PhysicsWorld, position: Vec3, layer: Group) -> Self {
        Self::spawn_with_config(physics, AgentBodyConfig::default(), position, layer)
    }

    /// Spawn an agent body with custom dimensions on `layer`
    pub fn spawn_with_config(
        physics: &mut PhysicsWorld,
        config: AgentBodyConfig,
        position: Vec3,
        layer: Group,
    ) -> Self {
        let rigid_body = RigidBodyBuilder::kinematic_position_based()
            .translation(convert::to_vector(position))
            .build();

        let half_height = (config.height - 2.0 * config.radius) / 2.0;
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), config.radius)
            .collision_groups(layers::member_of(layer))
            .friction(0.0)
            .restitution(0.0)
            .build();

        let (body, collider) = physics.add_kinematic_body(rigid_body, collider);
        Self {
            config,
            position,
            body,
            collider,
        }
    }

    /// Move the body so it arrives at `position` on the next physics step
    pub fn sync(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;
        if let Some(body) = physics.get_rigid_body_mut(self.body) {
            body.set_next_kinematic_translation(convert::to_vector(position));
        }
    }

    /// Bottom of the capsule
    pub fn feet_position(&self) -> Vec3 {
        self.position - Vec3::Y * (self.config.height / 2.0)
    }
}
