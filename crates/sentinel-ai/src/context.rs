//! Everything an enemy's tree leaves can see and touch.

use glam::{Quat, Vec3};
use noise::Perlin;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sentinel_core::{FrameTime, Transform};
use sentinel_physics::{ColliderHandle, Group, PhysicsWorld, ProjectilePrefab, RigidBodyHandle};

use crate::config::EnemyConfig;
use crate::state::CombatState;

/// Path-finding agent that moves the enemy.
pub trait Navigator {
    /// Ask the agent to walk to `destination`
    fn set_destination(&mut self, destination: Vec3);

    /// Last point of the current path. Differs from the destination when the
    /// destination cannot be reached.
    fn path_end_position(&self) -> Vec3;

    /// Current pose of the agent
    fn transform(&self) -> Transform;

    fn set_rotation(&mut self, rotation: Quat);

    /// Maximum movement speed in meters per second
    fn speed(&self) -> f32;

    /// Maximum turning speed in radians per second
    fn angular_speed(&self) -> f32;
}

/// Physical world queries and effects used by attacks.
pub trait CombatWorld {
    /// Colliders in `layers` intersecting the sphere
    fn overlap_sphere(&self, origin: Vec3, radius: f32, layers: Group) -> Vec<ColliderHandle>;

    /// Create a projectile body
    fn spawn_projectile(
        &mut self,
        prefab: &ProjectilePrefab,
        position: Vec3,
        rotation: Quat,
    ) -> RigidBodyHandle;

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3);

    /// Remove `body` after `delay` seconds
    fn schedule_despawn(&mut self, body: RigidBodyHandle, delay: f32);
}

impl CombatWorld for PhysicsWorld {
    fn overlap_sphere(&self, origin: Vec3, radius: f32, layers: Group) -> Vec<ColliderHandle> {
        PhysicsWorld::overlap_sphere(self, origin, radius, layers)
    }

    fn spawn_projectile(
        &mut self,
        prefab: &ProjectilePrefab,
        position: Vec3,
        rotation: Quat,
    ) -> RigidBodyHandle {
        PhysicsWorld::spawn_projectile(self, prefab, position, rotation)
    }

    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3) {
        PhysicsWorld::apply_impulse(self, body, impulse)
    }

    fn schedule_despawn(&mut self, body: RigidBodyHandle, delay: f32) {
        PhysicsWorld::schedule_despawn(self, body, delay)
    }
}

/// Read-only view of the opposing agent, refreshed every tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetSnapshot {
    pub position: Vec3,
    /// Unit facing direction
    pub forward: Vec3,
    pub velocity: Vec3,
}

impl TargetSnapshot {
    pub fn new(position: Vec3, forward: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            forward,
            velocity,
        }
    }

    /// A target standing at `position` facing world forward
    pub fn stationary(position: Vec3) -> Self {
        Self::new(position, Vec3::NEG_Z, Vec3::ZERO)
    }
}

/// Context handed to every leaf of an enemy's tree
pub struct EnemyContext<N, W> {
    pub config: EnemyConfig,
    pub state: CombatState,
    pub nav: N,
    pub world: W,
    pub target: TargetSnapshot,
    pub time: FrameTime,
    pub rng: StdRng,
    pub noise: Perlin,
}

impl<N: Navigator, W: CombatWorld> EnemyContext<N, W> {
    /// Build a context. The config is assumed valid.
    pub fn new(config: EnemyConfig, nav: N, world: W) -> Self {
        Self {
            state: CombatState::new(config.attack_cooldown),
            rng: StdRng::seed_from_u64(config.rng_seed),
            noise: Perlin::new(config.noise_seed),
            config,
            nav,
            world,
            target: TargetSnapshot::default(),
            time: FrameTime::default(),
        }
    }

    /// Squared distance from the enemy to the target
    pub fn distance_sq_to_target(&self) -> f32 {
        self.nav.transform().position.distance_squared(self.target.position)
    }
}
