use glam::Vec3;
use skyfolio_scene::{FrameTime, PlaneRig};
use tracing::debug;

use crate::oscillators::{FloatParams, float_offset, pulse, spin};

/// Tuning of the idle oscillators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleMotionConfig {
    /// Propeller rate in rad/s while the engine is engaged.
    pub propeller_active_rate: f32,
    /// Propeller rate in rad/s at idle.
    pub propeller_idle_rate: f32,
    /// Engine glow pulse amplitude.
    pub glow_amplitude: f32,
    /// Engine glow angular frequency in rad/s.
    pub glow_frequency: f32,
    /// Star dome rotation in rad/s while engaged.
    pub star_drift_active_rate: f32,
    /// Star dome rotation in rad/s at idle.
    pub star_drift_idle_rate: f32,
    /// Cloud puff rotation in rad/s while engaged.
    pub cloud_drift_active_rate: f32,
    /// Cloud puff rotation in rad/s at idle.
    pub cloud_drift_idle_rate: f32,
    /// Idle float parameters. Replaced by [`FloatParams::STILL`] under
    /// reduced motion.
    pub float: FloatParams,
}

impl Default for IdleMotionConfig {
    fn default() -> Self {
        Self {
            propeller_active_rate: 25.0,
            propeller_idle_rate: 3.0,
            glow_amplitude: 0.05,
            glow_frequency: 10.0,
            star_drift_active_rate: 1.5,
            star_drift_idle_rate: 0.3,
            cloud_drift_active_rate: 0.8,
            cloud_drift_idle_rate: 0.2,
            float: FloatParams::default(),
        }
    }
}

/// Background drift angles, in `[0, 2π)`. The renderer turns the star dome
/// and the cloud puffs by these; both speed up while the engine is engaged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkyDrift {
    pub stars: f32,
    pub clouds: f32,
}

/// Oscillator state. The propeller and sky drift angles accumulate; the glow
/// and the float are pure functions of elapsed time.
#[derive(Debug, Clone, Default)]
pub struct IdleMotion {
    config: IdleMotionConfig,
    propeller_angle: f32,
    sky: SkyDrift,
    engaged: bool,
}

impl IdleMotion {
    #[must_use]
    pub fn new(config: IdleMotionConfig) -> Self {
        Self {
            config,
            propeller_angle: 0.0,
            sky: SkyDrift::default(),
            engaged: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &IdleMotionConfig {
        &self.config
    }

    /// Accumulated propeller angle in `[0, 2π)`.
    #[must_use]
    pub fn propeller_angle(&self) -> f32 {
        self.propeller_angle
    }

    #[must_use]
    pub fn sky_drift(&self) -> SkyDrift {
        self.sky
    }

    /// Propeller rate for the given engine state.
    #[must_use]
    pub fn propeller_rate(&self, engaged: bool) -> f32 {
        if engaged {
            self.config.propeller_active_rate
        } else {
            self.config.propeller_idle_rate
        }
    }

    /// Advances the oscillators and writes the propeller, engine glow and
    /// float layers of `rig`. The body and tilt layers are left alone.
    pub fn update(
        &mut self,
        time: FrameTime,
        engaged: bool,
        reduced_motion: bool,
        rig: &mut PlaneRig,
    ) {
        if engaged != self.engaged {
            debug!("Propeller {}", if engaged { "spinning up" } else { "idling" });
            self.engaged = engaged;
        }

        let dt = if time.delta.is_finite() { time.delta.max(0.0) } else { 0.0 };
        self.propeller_angle = spin(self.propeller_angle, self.propeller_rate(engaged), dt);
        rig.propeller.rotation.z = self.propeller_angle;

        let cfg = &self.config;
        let (stars, clouds) = if engaged {
            (cfg.star_drift_active_rate, cfg.cloud_drift_active_rate)
        } else {
            (cfg.star_drift_idle_rate, cfg.cloud_drift_idle_rate)
        };
        self.sky.stars = spin(self.sky.stars, stars, dt);
        self.sky.clouds = spin(self.sky.clouds, clouds, dt);

        let glow = pulse(time.elapsed, self.config.glow_amplitude, self.config.glow_frequency);
        if glow.is_finite() {
            rig.engine_glow.scale = Vec3::splat(glow);
        }

        let params = if reduced_motion {
            FloatParams::STILL
        } else {
            self.config.float
        };
        let float = float_offset(time.elapsed, params);
        if float.is_finite() {
            rig.float = float;
        }
    }
}
