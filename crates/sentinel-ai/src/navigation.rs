//! Reference navigator for flat, obstacle-free arenas.

use glam::{Quat, Vec2, Vec3};
use sentinel_core::Transform;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::context::Navigator;

/// Movement tuning for [`GroundNavigator`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Meters per second
    pub speed: f32,
    /// Degrees per second
    pub angular_speed_deg: f32,
    /// Walkable area corner with the smallest x/z
    pub bounds_min: Vec2,
    /// Walkable area corner with the largest x/z
    pub bounds_max: Vec2,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            speed: 3.5,
            angular_speed_deg: 120.0,
            bounds_min: Vec2::splat(-20.0),
            bounds_max: Vec2::splat(20.0),
        }
    }
}

impl NavigatorConfig {
    /// Check speeds and that the walkable area is not empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extent = self.bounds_max - self.bounds_min;
        for (field, value) in [
            ("speed", self.speed),
            ("angular_speed_deg", self.angular_speed_deg),
            ("bounds width", extent.x),
            ("bounds depth", extent.y),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

/// Walks in straight lines inside an axis-aligned walkable rectangle.
///
/// A destination outside the rectangle is clamped to its edge, so the path
/// end no longer matches the destination and seeks toward it fail.
#[derive(Debug, Clone)]
pub struct GroundNavigator {
    pub config: NavigatorConfig,
    transform: Transform,
    path_end: Option<Vec3>,
    velocity: Vec3,
}

impl GroundNavigator {
    /// Create a new navigator standing at `position`
    pub fn new(config: NavigatorConfig, position: Vec3) -> Self {
        Self {
            config,
            transform: Transform::from_position(position),
            path_end: None,
            velocity: Vec3::ZERO,
        }
    }

    /// Clamp a point into the walkable area, keeping its height
    pub fn clamp_to_bounds(&self, point: Vec3) -> Vec3 {
        let flat = Vec2::new(point.x, point.z).clamp(self.config.bounds_min, self.config.bounds_max);
        Vec3::new(flat.x, point.y, flat.y)
    }

    /// Move along the current path for `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        let Some(end) = self.path_end else {
            self.velocity = Vec3::ZERO;
            return;
        };

        let offset = end - self.transform.position;
        let distance = offset.length();
        let step = self.config.speed * delta;

        if distance <= step || distance <= f32::EPSILON {
            self.transform.position = end;
            self.path_end = None;
            self.velocity = if delta > 0.0 { offset / delta } else { Vec3::ZERO };
            return;
        }

        let direction = offset / distance;
        self.transform.position += direction * step;
        self.velocity = direction * self.config.speed;
        self.transform
            .turn_towards_point(end, self.angular_speed() * delta);
    }

    /// Velocity over the last [`GroundNavigator::advance`]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn has_path(&self) -> bool {
        self.path_end.is_some()
    }
}

impl Navigator for GroundNavigator {
    fn set_destination(&mut self, destination: Vec3) {
        self.path_end = Some(self.clamp_to_bounds(destination));
    }

    fn path_end_position(&self) -> Vec3 {
        self.path_end.unwrap_or(self.transform.position)
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn speed(&self) -> f32 {
        self.config.speed
    }

    fn angular_speed(&self) -> f32 {
        self.config.angular_speed_deg.to_radians()
    }
}
