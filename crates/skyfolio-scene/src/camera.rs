//! Camera state shared by the portfolio choreographer and the flight chase
//! camera. Only one of them writes it in any given frame.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Starting camera position: in front of the plane, slightly pulled back.
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Current camera position and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Eye position in world space.
    pub position: Vec3,
    /// World-space point the camera is aimed at.
    pub look_at: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: INITIAL_CAMERA_POSITION,
            look_at: Vec3::ZERO,
        }
    }
}

impl CameraState {
    /// Creates a camera at `position` aimed at `look_at`.
    #[must_use]
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Aim the camera at `target`.
    pub fn look_at_point(&mut self, target: Vec3) {
        self.look_at = target;
    }

    /// Unit viewing direction. Falls back to `-Z` when the eye sits on the
    /// look-at point.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Camera orientation (camera looks down its local `-Z`), world up `+Y`.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
    }

    /// Right-handed view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    /// Whether both vectors are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_at_origin() {
        let cam = CameraState::default();
        assert_eq!(cam.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_degenerate_forward_falls_back() {
        let cam = CameraState::new(Vec3::ONE, Vec3::ONE);
        assert_eq!(cam.forward(), Vec3::NEG_Z);
        assert!(cam.orientation().is_finite());
    }

    #[test]
    fn test_vertical_forward_stays_finite() {
        let cam = CameraState::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert!(cam.orientation().is_finite());
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn test_view_matrix_puts_target_in_front() {
        let cam = CameraState::new(Vec3::new(-8.0, 2.0, 4.0), Vec3::new(3.0, 0.0, 0.0));
        let view_space = cam.view_matrix().transform_point3(cam.look_at);
        assert!(view_space.z < 0.0);
        assert!(view_space.x.abs() < 1e-4);
        assert!(view_space.y.abs() < 1e-4);
    }
}
