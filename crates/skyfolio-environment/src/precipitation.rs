//! Rain and petal particles.
//!
//! Particles are stored relative to the camera. Each frame they are shifted
//! back by the camera's displacement, fall, and wrap around inside a box
//! centred on the camera. They are never respawned ahead like clouds.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skyfolio_scene::{FrameTime, Rgb};
use skyfolio_weather::Precipitation;
use tracing::{debug, info};

use crate::error::EnvironmentError;
use crate::instance::{InstanceBuffer, InstanceRaw};
use crate::pool::Pool;

/// Half extents of the particle box around the camera.
pub const PARTICLE_HALF_EXTENTS: Vec3 = Vec3::new(30.0, 20.0, 30.0);

const RAIN_FALL: (f32, f32) = (25.0, 35.0);
const PETAL_FALL: (f32, f32) = (1.5, 3.0);
const PETAL_DRIFT_AMPLITUDE: f32 = 1.2;
const PETAL_DRIFT_FREQUENCY: f32 = 1.5;

const RAIN_COLOR: Rgb = Rgb::hex(0xa5b4fc);
const PETAL_COLOR: Rgb = Rgb::hex(0xf9a8d4);

/// A pooled particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position relative to the camera.
    pub offset: Vec3,
    pub seed: u64,
    /// Fall speed in units per second for the current kind.
    pub fall_speed: f32,
    /// Phase of the petal sway.
    pub drift_phase: f32,
}

impl Particle {
    /// Normalized fall bias in `[0, 1)` derived from the seed, so a kind
    /// change reassigns the same relative speed.
    fn fall_bias(&self) -> f32 {
        (self.seed >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Fixed particle pool wrapping around the camera.
#[derive(Debug, Clone)]
pub struct PrecipitationPool {
    particles: Pool<Particle>,
    kind: Precipitation,
    half_extents: Vec3,
    anchor: Option<Vec3>,
    instances: InstanceBuffer,
}

impl PrecipitationPool {
    /// Fills the box with `count` particles using `seed`. Starts with no
    /// precipitation.
    pub fn new(count: usize, seed: u64, half_extents: Vec3) -> Result<Self, EnvironmentError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let particles = Pool::new("particle", count, |_| {
            let unit = Vec3::new(rng.random(), rng.random(), rng.random());
            Particle {
                offset: (unit * 2.0 - Vec3::ONE) * half_extents,
                seed: rng.random(),
                fall_speed: 0.0,
                drift_phase: rng.random::<f32>() * std::f32::consts::TAU,
            }
        })?;
        debug!("Particle pool ready: {} particles", particles.len());

        Ok(Self {
            instances: InstanceBuffer::with_capacity(particles.len()),
            particles,
            kind: Precipitation::None,
            half_extents,
            anchor: None,
        })
    }

    /// Switches particle style. Fall speeds are reassigned from each seed.
    pub fn set_kind(&mut self, kind: Precipitation) {
        if kind == self.kind {
            return;
        }
        info!("Precipitation {:?} -> {:?}", self.kind, kind);
        self.kind = kind;
        let (min, max) = match kind {
            Precipitation::None => (0.0, 0.0),
            Precipitation::Rain => RAIN_FALL,
            Precipitation::Petals => PETAL_FALL,
        };
        for particle in &mut self.particles {
            particle.fall_speed = min + particle.fall_bias() * (max - min);
        }
    }

    /// Current style.
    #[must_use]
    pub fn kind(&self) -> Precipitation {
        self.kind
    }

    /// Advances every particle one frame relative to a camera now at
    /// `camera_position`.
    pub fn update(&mut self, camera_position: Vec3, time: FrameTime) {
        let shift = self
            .anchor
            .map_or(Vec3::ZERO, |previous| camera_position - previous);
        self.anchor = Some(camera_position);
        if self.kind == Precipitation::None || !shift.is_finite() {
            return;
        }

        let dt = if time.delta.is_finite() { time.delta.max(0.0) } else { 0.0 };
        let petals = self.kind == Precipitation::Petals;
        for particle in &mut self.particles {
            let mut offset = particle.offset - shift;
            offset.y -= particle.fall_speed * dt;
            if petals {
                let phase = time.elapsed * PETAL_DRIFT_FREQUENCY + particle.drift_phase;
                offset.x += phase.sin() * PETAL_DRIFT_AMPLITUDE * dt;
                offset.z += (phase * 0.7).cos() * PETAL_DRIFT_AMPLITUDE * 0.5 * dt;
            }
            particle.offset = wrap(offset, self.half_extents);
        }
    }

    /// Rewrites the instance buffer with the first `visible` particles in
    /// world space.
    pub fn refresh_instances(&mut self, camera_position: Vec3, visible: usize) {
        let (scale, color, alpha) = match self.kind {
            Precipitation::None => (0.0, RAIN_COLOR, 0.0),
            Precipitation::Rain => (1.0, RAIN_COLOR, 0.5),
            Precipitation::Petals => (0.15, PETAL_COLOR, 0.9),
        };
        let visible = if self.kind == Precipitation::None { 0 } else { visible };
        let tint = color.to_rgba(alpha);
        self.instances.refresh(
            self.particles
                .iter()
                .take(visible)
                .map(|p| InstanceRaw::new(camera_position + p.offset, scale, tint)),
        );
    }

    /// The particles.
    #[must_use]
    pub fn particles(&self) -> &Pool<Particle> {
        &self.particles
    }

    /// Half extents of the wrap box.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Instance records written by the last refresh.
    #[must_use]
    pub fn instances(&self) -> &[InstanceRaw] {
        self.instances.records()
    }

    /// The same records as raw bytes for upload.
    #[must_use]
    pub fn instance_bytes(&self) -> &[u8] {
        self.instances.bytes()
    }
}

/// Wraps each component of `offset` into `[-half, half]`.
fn wrap(offset: Vec3, half: Vec3) -> Vec3 {
    let axis = |v: f32, h: f32| (v + h).rem_euclid(2.0 * h) - h;
    Vec3::new(
        axis(offset.x, half.x),
        axis(offset.y, half.y),
        axis(offset.z, half.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn inside(pool: &PrecipitationPool) -> bool {
        let h = pool.half_extents() + Vec3::splat(1e-3);
        pool.particles()
            .iter()
            .all(|p| p.offset.abs().cmple(h).all())
    }

    #[test]
    fn test_wrap_any_magnitude() {
        let half = Vec3::new(10.0, 5.0, 10.0);
        assert_eq!(wrap(Vec3::new(12.0, 0.0, 0.0), half), Vec3::new(-8.0, 0.0, 0.0));
        assert_eq!(wrap(Vec3::new(0.0, -6.0, 0.0), half), Vec3::new(0.0, 4.0, 0.0));
        let far = wrap(Vec3::new(1234.5, -987.0, 40.0), half);
        assert!(far.abs().cmple(half).all());
    }

    #[test]
    fn test_rain_falls_and_stays_in_box() {
        let mut pool = PrecipitationPool::new(200, 1, PARTICLE_HALF_EXTENTS).unwrap();
        pool.set_kind(Precipitation::Rain);
        assert!(pool.particles().iter().all(|p| (25.0..=35.0).contains(&p.fall_speed)));

        let y0 = pool.particles().get(0).offset.y;
        pool.update(Vec3::ZERO, FrameTime::new(DT, DT));
        let y1 = pool.particles().get(0).offset.y;
        assert!(y1 < y0 || y1 > y0 + 30.0, "particle 0 neither fell nor wrapped");

        for i in 0..600 {
            let t = i as f32 * DT;
            pool.update(Vec3::new(0.0, 0.0, t * 40.0), FrameTime::new(t, DT));
            assert!(inside(&pool));
        }
        assert_eq!(pool.particles().len(), 200);
    }

    #[test]
    fn test_camera_shift_moves_particles_back() {
        let mut pool = PrecipitationPool::new(50, 3, PARTICLE_HALF_EXTENTS).unwrap();
        pool.set_kind(Precipitation::Petals);
        pool.update(Vec3::ZERO, FrameTime::new(0.0, 0.0));
        let before = pool.particles().get(0).offset;
        pool.update(Vec3::new(1.0, 0.0, 0.0), FrameTime::new(0.0, 0.0));
        let after = pool.particles().get(0).offset;
        let expected = wrap(before - Vec3::X, PARTICLE_HALF_EXTENTS);
        assert!((after - expected).length() < 1e-5);
    }

    #[test]
    fn test_petals_drift_sideways_while_rain_falls_straight() {
        let time = FrameTime::new(1.0, DT);
        for kind in [Precipitation::Petals, Precipitation::Rain] {
            let mut pool = PrecipitationPool::new(40, 8, PARTICLE_HALF_EXTENTS).unwrap();
            pool.set_kind(kind);
            pool.update(Vec3::ZERO, FrameTime::new(0.0, 0.0));
            let before: Vec<Particle> = pool.particles().iter().copied().collect();
            pool.update(Vec3::ZERO, time);

            let mut drifted = 0;
            for (old, new) in before.iter().zip(pool.particles()) {
                let fell = old.offset - Vec3::new(0.0, old.fall_speed * DT, 0.0);
                let expected = if kind == Precipitation::Petals {
                    let phase = time.elapsed * PETAL_DRIFT_FREQUENCY + old.drift_phase;
                    fell + Vec3::new(
                        phase.sin() * PETAL_DRIFT_AMPLITUDE * DT,
                        0.0,
                        (phase * 0.7).cos() * PETAL_DRIFT_AMPLITUDE * 0.5 * DT,
                    )
                } else {
                    fell
                };
                let expected = wrap(expected, PARTICLE_HALF_EXTENTS);
                assert!((new.offset - expected).length() < 1e-4);
                if (new.offset.x - old.offset.x).abs() > 1e-4 {
                    drifted += 1;
                }
                if kind == Precipitation::Rain {
                    assert!((new.offset.x - old.offset.x).abs() < 1e-4);
                    assert!((new.offset.z - old.offset.z).abs() < 1e-4);
                }
            }
            if kind == Precipitation::Petals {
                assert!(drifted > 30, "only {drifted} petals drifted");
            }
        }
    }

    #[test]
    fn test_none_hides_everything() {
        let mut pool = PrecipitationPool::new(10, 5, PARTICLE_HALF_EXTENTS).unwrap();
        let before: Vec<Particle> = pool.particles().iter().copied().collect();
        pool.update(Vec3::ZERO, FrameTime::new(0.0, DT));
        pool.update(Vec3::ONE, FrameTime::new(DT, DT));
        pool.refresh_instances(Vec3::ZERO, 10);
        assert!(pool.instances().is_empty());
        assert_eq!(before.as_slice(), pool.particles().as_slice());
    }

    #[test]
    fn test_visible_count_limits_instances() {
        let mut pool = PrecipitationPool::new(100, 6, PARTICLE_HALF_EXTENTS).unwrap();
        pool.set_kind(Precipitation::Petals);
        pool.refresh_instances(Vec3::ZERO, 60);
        assert_eq!(pool.instances().len(), 60);
        assert_eq!(pool.instance_bytes().len(), 60 * 32);
    }
}
