//! Enemy tuning values.

use glam::Vec3;
use sentinel_physics::{layers, Group, ProjectilePrefab};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected enemy configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("melee range {melee} must be shorter than ranged range {ranged}")]
    InvertedRanges { melee: f32, ranged: f32 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

/// Tuning for one enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Distance at or below which the enemy closes in and strikes
    pub melee_range: f32,
    /// Distance below which the enemy shoots
    pub ranged_range: f32,
    /// Seconds between attacks of either kind
    pub attack_cooldown: f32,
    /// Radius of the melee hit sphere
    pub attack_radius: f32,
    /// Center of the melee hit sphere in the enemy's local space
    pub attack_point: Vec3,
    /// Seek succeeds once the agent is closer than this to its destination
    pub arrival_distance: f32,
    /// Seek fails once the reachable path end is this far from the destination
    pub path_slack: f32,
    /// Radius of the wander circle
    pub wander_radius: f32,
    /// Per-tick random displacement of the wander target
    pub wander_jitter: f32,
    /// Scale of the noise-driven forward push while wandering
    pub wander_forward_scale: f32,
    /// Below this `|velocity|² * delta` the target counts as standing still
    pub stationary_threshold: f32,
    /// Pursuit: the target is behind the enemy past this angle (degrees)
    pub overshoot_angle_deg: f32,
    /// Pursuit: headings within this angle count as aligned (degrees)
    pub heading_tolerance_deg: f32,
    /// Impulse per meter of distance to the target
    pub projectile_impulse: f32,
    pub projectile_radius: f32,
    pub projectile_mass: f32,
    /// Collision group bits the melee overlap may hit
    pub target_layer: u32,
    /// Seed of the wander noise
    pub noise_seed: u32,
    /// Seed of the wander jitter
    pub rng_seed: u64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            melee_range: 3.0,
            ranged_range: 8.0,
            attack_cooldown: 5.0,
            attack_radius: 1.0,
            attack_point: Vec3::new(0.0, 0.0, -1.0),
            arrival_distance: 2.0,
            path_slack: 2.0,
            wander_radius: 4.0,
            wander_jitter: 1.0,
            wander_forward_scale: 0.25,
            stationary_threshold: 0.1,
            overshoot_angle_deg: 90.0,
            heading_tolerance_deg: 20.0,
            projectile_impulse: 5.0,
            projectile_radius: 0.1,
            projectile_mass: 0.2,
            target_layer: layers::TARGET.bits(),
            noise_seed: 0,
            rng_seed: 0,
        }
    }
}

impl EnemyConfig {
    /// Check ranges and magnitudes
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("melee_range", self.melee_range),
            ("ranged_range", self.ranged_range),
            ("attack_radius", self.attack_radius),
            ("arrival_distance", self.arrival_distance),
            ("path_slack", self.path_slack),
            ("wander_radius", self.wander_radius),
            ("stationary_threshold", self.stationary_threshold),
            ("projectile_radius", self.projectile_radius),
            ("projectile_mass", self.projectile_mass),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("attack_cooldown", self.attack_cooldown),
            ("wander_jitter", self.wander_jitter),
            ("wander_forward_scale", self.wander_forward_scale),
            ("projectile_impulse", self.projectile_impulse),
            ("overshoot_angle_deg", self.overshoot_angle_deg),
            ("heading_tolerance_deg", self.heading_tolerance_deg),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.melee_range >= self.ranged_range {
            return Err(ConfigError::InvertedRanges {
                melee: self.melee_range,
                ranged: self.ranged_range,
            });
        }

        Ok(())
    }

    /// Layers the melee overlap is allowed to hit
    pub fn target_layers(&self) -> Group {
        layers::from_bits(self.target_layer)
    }

    /// Projectile description for ranged attacks
    pub fn projectile_prefab(&self) -> ProjectilePrefab {
        ProjectilePrefab {
            radius: self.projectile_radius,
            mass: self.projectile_mass,
            ..Default::default()
        }
    }
}
