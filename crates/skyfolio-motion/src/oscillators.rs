//! Stateless periodic functions of elapsed time.

use glam::Vec3;
use skyfolio_scene::Transform;
use std::f32::consts::TAU;

/// Advances a spinning angle by `rate * dt`, wrapped to `[0, 2π)`.
#[must_use]
pub fn spin(angle: f32, rate: f32, dt: f32) -> f32 {
    let next = (angle + rate * dt).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU.
    if next.is_finite() && next < TAU { next } else { 0.0 }
}

/// Pulse `1 + amplitude * sin(frequency * t)`.
#[must_use]
pub fn pulse(elapsed: f32, amplitude: f32, frequency: f32) -> f32 {
    1.0 + amplitude * (frequency * elapsed).sin()
}

/// Parameters of the idle float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatParams {
    /// Time scale of the bob.
    pub speed: f32,
    /// Scales the rocking rotation.
    pub rotation_intensity: f32,
    /// Scales the vertical bob.
    pub float_intensity: f32,
}

impl FloatParams {
    /// All zero: the float holds the plane still.
    pub const STILL: Self = Self {
        speed: 0.0,
        rotation_intensity: 0.0,
        float_intensity: 0.0,
    };
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            speed: 2.0,
            rotation_intensity: 0.4,
            float_intensity: 0.5,
        }
    }
}

/// Float offset at `elapsed` seconds: a slow rock on all three axes and a
/// vertical bob, sharing one phase `t * speed / 4`.
#[must_use]
pub fn float_offset(elapsed: f32, params: FloatParams) -> Transform {
    let phase = elapsed * params.speed / 4.0;
    let (sin, cos) = phase.sin_cos();
    let ri = params.rotation_intensity;
    Transform {
        position: Vec3::new(0.0, sin / 10.0 * params.float_intensity, 0.0),
        rotation: Vec3::new(cos / 8.0 * ri, sin / 8.0 * ri, sin / 20.0 * ri),
        scale: Vec3::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_wraps() {
        assert!((spin(6.0, 25.0, 0.1) - (8.5 - TAU)).abs() < 1e-5);
        assert_eq!(spin(0.0, 3.0, 0.0), 0.0);
        assert_eq!(spin(f32::NAN, 3.0, 0.1), 0.0);
        for i in 0..1000 {
            let a = spin(i as f32 * 0.37, 25.0, 1.0 / 60.0);
            assert!((0.0..TAU).contains(&a));
        }
    }

    #[test]
    fn test_pulse_bounds() {
        for i in 0..500 {
            let s = pulse(i as f32 * 0.013, 0.05, 10.0);
            assert!((0.95..=1.05).contains(&s));
        }
        assert_eq!(pulse(0.0, 0.05, 10.0), 1.0);
    }

    #[test]
    fn test_float_matches_formula() {
        let t = 3.7_f32;
        let offset = float_offset(t, FloatParams::default());
        let phase = t * 2.0 / 4.0;
        assert!((offset.position.y - phase.sin() / 10.0 * 0.5).abs() < 1e-6);
        assert!((offset.rotation.x - phase.cos() / 8.0 * 0.4).abs() < 1e-6);
        assert!((offset.rotation.y - phase.sin() / 8.0 * 0.4).abs() < 1e-6);
        assert!((offset.rotation.z - phase.sin() / 20.0 * 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_still_float_is_identity() {
        for t in [0.0, 1.0, 123.4] {
            assert_eq!(float_offset(t, FloatParams::STILL), Transform::IDENTITY);
        }
    }
}
