//! Scripted collaborators for leaf and tree tests.

use std::cell::RefCell;

use glam::{Quat, Vec3};
use sentinel_core::Transform;
use sentinel_physics::{layers, ColliderHandle, Group, ProjectilePrefab, RigidBodyHandle};

use crate::config::EnemyConfig;
use crate::context::{CombatWorld, EnemyContext, Navigator};

pub type TestContext = EnemyContext<MockNavigator, MockWorld>;

pub fn context(config: EnemyConfig, nav: MockNavigator, world: MockWorld) -> TestContext {
    EnemyContext::new(config, nav, world)
}

/// Navigator that records destinations and never moves on its own
#[derive(Debug, Clone)]
pub struct MockNavigator {
    pub transform: Transform,
    pub destinations: Vec<Vec3>,
    /// Reported path end; defaults to the last destination
    pub path_end_override: Option<Vec3>,
    pub speed: f32,
    pub angular_speed: f32,
}

impl MockNavigator {
    pub fn at(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            destinations: Vec::new(),
            path_end_override: None,
            speed: 3.0,
            angular_speed: std::f32::consts::PI,
        }
    }
}

impl Navigator for MockNavigator {
    fn set_destination(&mut self, destination: Vec3) {
        self.destinations.push(destination);
    }

    fn path_end_position(&self) -> Vec3 {
        self.path_end_override
            .or_else(|| self.destinations.last().copied())
            .unwrap_or(self.transform.position)
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn angular_speed(&self) -> f32 {
        self.angular_speed
    }
}

/// World with at most one spherical target, recording every call
#[derive(Debug, Clone, Default)]
pub struct MockWorld {
    /// Target center and radius, on the target layer
    pub target: Option<(Vec3, f32)>,
    pub overlaps: RefCell<Vec<(Vec3, f32, Group)>>,
    pub spawned: Vec<(Vec3, Quat)>,
    pub impulses: Vec<(RigidBodyHandle, Vec3)>,
    pub despawns: Vec<(RigidBodyHandle, f32)>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(position: Vec3, radius: f32) -> Self {
        Self {
            target: Some((position, radius)),
            ..Default::default()
        }
    }
}

impl CombatWorld for MockWorld {
    fn overlap_sphere(&self, origin: Vec3, radius: f32, mask: Group) -> Vec<ColliderHandle> {
        self.overlaps.borrow_mut().push((origin, radius, mask));
        let hit = self.target.is_some_and(|(position, target_radius)| {
            mask.contains(layers::TARGET) && origin.distance(position) <= radius + target_radius
        });
        if hit {
            vec![ColliderHandle::from_raw_parts(0, 0)]
        } else {
            Vec::new()
        }
    }

    fn spawn_projectile(
        &mut self,
        _prefab: &ProjectilePrefab,
        position: Vec3,
        rotation: Quat,
    ) -> RigidBodyHandle {
        self.spawned.push((position, rotation));
        RigidBodyHandle::from_raw_parts(self.spawned.len() as u32, 0)
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3) {
        self.impulses.push((body, impulse));
    }

    fn schedule_despawn(&mut self, body: RigidBodyHandle, delay: f32) {
        self.despawns.push((body, delay));
    }
}
