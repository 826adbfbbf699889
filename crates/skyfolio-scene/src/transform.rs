//! Scene-graph node transforms.
//!
//! A [`Transform`] is the mutable position/rotation/scale triple the renderer
//! reads every frame. Rotations are Euler angles in XYZ order, matching the
//! matrix convention `Rx * Ry * Rz`.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation (radians, XYZ order) and scale of one scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent node.
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Identity transform placed at `position`.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Identity transform with a uniform scale.
    #[must_use]
    pub fn from_uniform_scale(scale: f32) -> Self {
        Self {
            scale: Vec3::splat(scale),
            ..Self::IDENTITY
        }
    }

    /// Rotation as a unit quaternion.
    #[must_use]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Set the rotation from a quaternion, converting to XYZ Euler angles.
    pub fn set_quat(&mut self, rotation: Quat) {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Local-to-parent matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// The nested transforms that make up the hero plane.
///
/// Each layer has exactly one writer per frame:
///
/// - `body`: the Flight Integrator (world position and heading in free flight).
/// - `float`: the Idle Motion Layer's gentle float.
/// - `tilt`: the Camera Choreographer's pointer parallax (rotation X/Z only).
/// - `propeller`, `engine_glow`: the Idle Motion Layer's oscillators.
///
/// The composed world matrix is `body * float * tilt`, so the float and the
/// tilt sum instead of overwriting each other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaneRig {
    /// World placement of the whole plane.
    pub body: Transform,
    /// Idle float offset.
    pub float: Transform,
    /// Pointer tilt.
    pub tilt: Transform,
    /// Propeller hub, relative to the plane.
    pub propeller: Transform,
    /// Engine glow disc, relative to the plane.
    pub engine_glow: Transform,
}

impl PlaneRig {
    /// World matrix of the plane root.
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        self.body.matrix() * self.float.matrix() * self.tilt.matrix()
    }

    /// World matrix of the propeller hub.
    #[must_use]
    pub fn propeller_matrix(&self) -> Mat4 {
        self.world_matrix() * self.propeller.matrix()
    }

    /// World matrix of the engine glow.
    #[must_use]
    pub fn engine_glow_matrix(&self) -> Mat4 {
        self.world_matrix() * self.engine_glow.matrix()
    }

    /// Whether every layer is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.body.is_finite()
            && self.float.is_finite()
            && self.tilt.is_finite()
            && self.propeller.is_finite()
            && self.engine_glow.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::IDENTITY.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_quat_roundtrip_preserves_rotation() {
        let mut t = Transform::IDENTITY;
        let q = Quat::from_euler(EulerRot::YXZ, 0.4, -0.3, 0.2);
        t.set_quat(q);
        assert!(t.quat().angle_between(q) < 1e-4);
    }

    #[test]
    fn test_rotation_order_is_xyz() {
        let t = Transform {
            rotation: Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0),
            ..Transform::IDENTITY
        };
        let expected = Quat::from_rotation_x(FRAC_PI_2) * Quat::from_rotation_y(FRAC_PI_2);
        assert!(t.quat().angle_between(expected) < 1e-5);
    }

    #[test]
    fn test_float_and_tilt_compose() {
        let mut rig = PlaneRig::default();
        rig.float.position.y = 0.05;
        rig.tilt.rotation.z = 0.2;
        let m = rig.world_matrix();
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin.y - 0.05).abs() < 1e-6);
        let right = m.transform_vector3(Vec3::X);
        assert!((right.y - 0.2_f32.sin()).abs() < 1e-5);
    }

    #[test]
    fn test_non_finite_detected() {
        let mut rig = PlaneRig::default();
        assert!(rig.is_finite());
        rig.propeller.rotation.z = f32::NAN;
        assert!(!rig.is_finite());
    }
}
