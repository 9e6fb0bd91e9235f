//! Conversions between glam (gameplay) and nalgebra (rapier) math types.

use glam::{Quat, Vec3};
use nalgebra::{Quaternion, Translation3, UnitQuaternion};
use rapier3d::prelude::{Isometry, Real, Vector};

pub fn to_vector(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

pub fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_rotation(q: Quat) -> UnitQuaternion<Real> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

/// Rigid pose at `position` with `rotation`
pub fn to_isometry(position: Vec3, rotation: Quat) -> Isometry<Real> {
    Isometry::from_parts(
        Translation3::new(position.x, position.y, position.z),
        to_rotation(rotation),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapier3d::prelude::Point;

    #[test]
    fn test_isometry_places_local_points() {
        let iso = to_isometry(Vec3::new(1.0, 2.0, -3.0), Quat::from_rotation_y(0.7));

        let origin = iso * Point::origin();
        assert!((from_vector(&origin.coords) - Vec3::new(1.0, 2.0, -3.0)).length() < 1e-5);

        let ahead = iso * Point::new(0.0, 0.0, -1.0);
        let expected = Vec3::new(1.0, 2.0, -3.0) + Quat::from_rotation_y(0.7) * Vec3::NEG_Z;
        assert!((from_vector(&ahead.coords) - expected).length() < 1e-5);
    }

    #[test]
    fn test_rotation_agrees_on_forward() {
        let rotation = Quat::from_rotation_y(1.2);
        let glam_forward = rotation * Vec3::NEG_Z;
        let na_forward = to_rotation(rotation) * Vector::new(0.0, 0.0, -1.0);
        assert!((glam_forward - from_vector(&na_forward)).length() < 1e-5);
    }
}
