//! Core types used throughout the Sentinel crates

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of an agent in the world.
///
/// Local forward is negative Z, matching the rest of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Convert a point from this transform's local space into world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Upright rotation whose forward axis points along `direction`.
    ///
    /// The direction is flattened onto the ground plane so agents only yaw.
    /// Returns `None` when the flattened direction has no length.
    pub fn look_rotation(direction: Vec3) -> Option<Quat> {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        let forward = flat.try_normalize()?;
        let back = -forward;
        let right = Vec3::Y.cross(back).normalize();
        let up = back.cross(right);
        Some(Quat::from_mat3(&Mat3::from_cols(right, up, back)))
    }

    /// Rotate toward `target` by at most `max_angle` radians.
    ///
    /// Snaps onto the target once the remaining angle fits in one step.
    pub fn turn_towards(&mut self, target: Quat, max_angle: f32) {
        let angle = self.rotation.angle_between(target);
        if angle <= max_angle.max(0.0) || angle <= f32::EPSILON {
            self.rotation = target;
        } else {
            self.rotation = self.rotation.slerp(target, max_angle / angle).normalize();
        }
    }

    /// Turn to face a world-space point, bounded by `max_angle` radians
    pub fn turn_towards_point(&mut self, point: Vec3, max_angle: f32) {
        if let Some(target) = Self::look_rotation(point - self.position) {
            self.turn_towards(target, max_angle);
        }
    }
}
