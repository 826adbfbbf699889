//! Exponential smoothing helpers shared by the camera controllers.

use glam::Vec3;

/// Frame-rate independent blend factor `rate * dt`, clamped to `[0, 1]`.
///
/// Clamping keeps a long frame from overshooting the target; a non-finite or
/// negative `dt` yields `0` (hold still).
#[must_use]
pub fn blend_factor(rate: f32, dt: f32) -> f32 {
    let t = rate * dt;
    if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 }
}

/// Moves `current` toward `target` by fraction `t` of the remaining distance.
#[must_use]
pub fn lerp_toward(current: Vec3, target: Vec3, t: f32) -> Vec3 {
    current.lerp(target, t.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_scales_with_dt() {
        assert!((blend_factor(2.0, 1.0 / 60.0) - 2.0 / 60.0).abs() < 1e-7);
        assert!((blend_factor(2.0, 1.0 / 30.0) - 2.0 / 30.0).abs() < 1e-7);
    }

    #[test]
    fn test_blend_clamped() {
        assert_eq!(blend_factor(2.0, 5.0), 1.0);
        assert_eq!(blend_factor(2.0, -1.0), 0.0);
        assert_eq!(blend_factor(2.0, f32::NAN), 0.0);
        assert_eq!(blend_factor(2.0, f32::INFINITY), 0.0);
    }

    #[test]
    fn test_lerp_never_overshoots() {
        let target = Vec3::new(10.0, 0.0, 0.0);
        let mut current = Vec3::ZERO;
        for _ in 0..500 {
            current = lerp_toward(current, target, 0.3);
            assert!(current.x <= target.x);
        }
        assert!((current - target).length() < 1e-4);
    }
}
