//! Sentinel Physics - Physics simulation using rapier3d
//!
//! Provides the world combat code reaches into: sphere overlap queries on a
//! layer mask, projectile spawning with impulses and timed removal, and
//! kinematic agent bodies.

mod agent_body;
pub mod convert;
pub mod layers;

pub use agent_body::{AgentBody, AgentBodyConfig};
pub use rapier3d::prelude::{ColliderHandle, Group, RigidBodyHandle};

use glam::{Quat, Vec3};
use nalgebra::Unit;
use rapier3d::prelude::*;
use tracing::{debug, trace};

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// Shape and mass of a spawned projectile
#[derive(Debug, Clone)]
pub struct ProjectilePrefab {
    /// Ball radius
    pub radius: f32,
    /// Mass in kg
    pub mass: f32,
    /// Enable continuous collision detection for fast shots
    pub ccd: bool,
}

impl Default for ProjectilePrefab {
    fn default() -> Self {
        Self {
            radius: 0.1,
            mass: 0.2,
            ccd: true,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for overlap queries
    query_pipeline: QueryPipeline,

    /// Bodies waiting for removal, with seconds left
    pending_despawns: Vec<(RigidBodyHandle, f32)>,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            pending_despawns: Vec::new(),
        }
    }

    /// Step the physics simulation by one timestep
    pub fn step(&mut self) {
        let gravity = convert::to_vector(self.config.gravity);

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.process_despawns(self.config.timestep);

        // Update query pipeline after physics step
        self.refresh_queries();
    }

    /// Rebuild the query acceleration structure from the current colliders.
    ///
    /// [`PhysicsWorld::step`] does this already; call it directly after adding
    /// colliders when a query must see them before the next step.
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    fn process_despawns(&mut self, elapsed: f32) {
        let mut expired = Vec::new();
        self.pending_despawns.retain_mut(|(handle, remaining)| {
            *remaining -= elapsed;
            if *remaining <= 0.0 {
                expired.push(*handle);
                false
            } else {
                true
            }
        });

        for handle in expired {
            trace!(?handle, "despawning body");
            self.remove_rigid_body(handle);
        }
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Add a dynamic rigid body with a collider
    pub fn add_dynamic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        self.insert_body(rigid_body, collider)
    }

    /// Add a kinematic rigid body with a collider
    pub fn add_kinematic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        self.insert_body(rigid_body, collider)
    }

    fn insert_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        (rb_handle, col_handle)
    }

    /// Remove a rigid body and its colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        self.pending_despawns.retain(|(pending, _)| *pending != handle);
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable rigid body by handle
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// World position of a body's center of its local frame
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.get_rigid_body(handle)
            .map(|body| convert::from_vector(body.translation()))
    }

    /// Linear velocity of a body
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.get_rigid_body(handle)
            .map(|body| convert::from_vector(body.linvel()))
    }

    /// Number of rigid bodies alive in the world
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Number of bodies waiting for timed removal
    pub fn pending_despawn_count(&self) -> usize {
        self.pending_despawns.len()
    }

    /// Colliders in `layers` intersecting a sphere at `origin`
    pub fn overlap_sphere(&self, origin: Vec3, radius: f32, layers: Group) -> Vec<ColliderHandle> {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(origin.x, origin.y, origin.z);
        let filter = QueryFilter::default().groups(layers::query_mask(layers));

        let mut hits = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
            |handle| {
                hits.push(handle);
                true
            },
        );
        hits
    }

    /// Spawn a dynamic projectile body from `prefab`
    pub fn spawn_projectile(
        &mut self,
        prefab: &ProjectilePrefab,
        position: Vec3,
        rotation: Quat,
    ) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .position(convert::to_isometry(position, rotation))
            .ccd_enabled(prefab.ccd)
            .build();
        let collider = ColliderBuilder::ball(prefab.radius)
            .mass(prefab.mass)
            .collision_groups(layers::projectile_groups())
            .build();

        let (handle, _) = self.add_dynamic_body(rigid_body, collider);
        debug!(?handle, ?position, "spawned projectile");
        handle
    }

    /// Apply an instantaneous impulse to a body. Unknown handles are ignored.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(body) = self.get_rigid_body_mut(handle) {
            body.apply_impulse(convert::to_vector(impulse), true);
        }
    }

    /// Remove a body once `delay` seconds of simulation have elapsed
    pub fn schedule_despawn(&mut self, handle: RigidBodyHandle, delay: f32) {
        if let Some(entry) = self.pending_despawns.iter_mut().find(|(h, _)| *h == handle) {
            entry.1 = delay;
        } else {
            self.pending_despawns.push((handle, delay));
        }
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .collision_groups(layers::member_of(layers::ENVIRONMENT))
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
