//! Section-driven camera choreography.
//!
//! Each frame the camera eases toward the active section's vantage point plus
//! a slow vertical wobble, and its aim eases toward a point pushed sideways
//! when a content panel is open. Nothing is ever assigned directly, so a
//! section change mid-flight bends the path instead of cutting it.

use glam::Vec3;
use skyfolio_input::InputSnapshot;
use skyfolio_scene::{CameraState, FrameTime, Section, Transform, finite_vec3_or};

use crate::smoothing::{blend_factor, lerp_toward};

/// Tuning for [`Choreographer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoreographyConfig {
    /// Catch-up rate per second; the per-frame blend is `rate * dt`.
    pub catch_up_rate: f32,
    /// Fixed per-frame blend used instead when reduced motion is on.
    pub reduced_motion_blend: f32,
    /// Vertical wobble amplitude in world units.
    pub wobble_amplitude: f32,
    /// Wobble angular frequency in rad/s.
    pub wobble_frequency: f32,
    /// Lateral look-at offset while a side panel is open.
    pub side_panel_offset: f32,
    /// Plane pitch per unit of vertical pointer position.
    pub tilt_pitch_gain: f32,
    /// Plane roll per unit of horizontal pointer position.
    pub tilt_roll_gain: f32,
    /// Per-frame blend of the tilt toward its target.
    pub tilt_blend: f32,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            catch_up_rate: 2.0,
            reduced_motion_blend: 0.1,
            wobble_amplitude: 0.3,
            wobble_frequency: 0.5,
            side_panel_offset: 3.0,
            tilt_pitch_gain: 0.2,
            tilt_roll_gain: 0.4,
            tilt_blend: 0.1,
        }
    }
}

/// Persistent smoothing state of the portfolio camera.
#[derive(Debug, Clone)]
pub struct Choreographer {
    config: ChoreographyConfig,
    look_at: Vec3,
}

impl Default for Choreographer {
    fn default() -> Self {
        Self::new(ChoreographyConfig::default())
    }
}

impl Choreographer {
    /// Creates a choreographer aiming at the origin.
    #[must_use]
    pub fn new(config: ChoreographyConfig) -> Self {
        Self {
            config,
            look_at: Vec3::ZERO,
        }
    }

    /// The tuning in use.
    #[must_use]
    pub fn config(&self) -> &ChoreographyConfig {
        &self.config
    }

    /// The smoothed look-at point written to the camera last frame.
    #[must_use]
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Continue smoothing from wherever the camera currently aims. Called when
    /// portfolio mode regains the camera so the aim does not jump back to a
    /// stale point.
    pub fn resume_from(&mut self, camera: &CameraState) {
        self.look_at = camera.look_at;
    }

    /// Camera destination for `section` at `elapsed` seconds.
    #[must_use]
    pub fn target_position(&self, section: Section, elapsed: f32, reduced_motion: bool) -> Vec3 {
        let wobble = if reduced_motion {
            0.0
        } else {
            (elapsed * self.config.wobble_frequency).sin() * self.config.wobble_amplitude
        };
        section.camera_target() + Vec3::new(0.0, wobble, 0.0)
    }

    /// Aim destination for `section`. Looking right of the origin shifts the
    /// plane to the left of the viewport, clear of the content panel.
    #[must_use]
    pub fn look_at_target(&self, section: Section) -> Vec3 {
        let lateral = if section.has_side_panel() {
            self.config.side_panel_offset
        } else {
            0.0
        };
        Vec3::new(lateral, 0.0, 0.0)
    }

    /// Per-frame blend toward the targets.
    #[must_use]
    pub fn blend(&self, dt: f32, reduced_motion: bool) -> f32 {
        if reduced_motion {
            self.config.reduced_motion_blend
        } else {
            blend_factor(self.config.catch_up_rate, dt)
        }
    }

    /// Advances the camera one frame toward `section` and eases the plane's
    /// tilt toward the pointer.
    ///
    /// Writes only `camera` and the X/Z rotation of `tilt`.
    pub fn update(
        &mut self,
        section: Section,
        time: FrameTime,
        input: &InputSnapshot,
        camera: &mut CameraState,
        tilt: &mut Transform,
    ) {
        let reduced = input.reduced_motion;
        let t = self.blend(time.delta, reduced);

        let target = self.target_position(section, time.elapsed, reduced);
        let position = lerp_toward(camera.position, target, t);
        camera.position = finite_vec3_or(position, camera.position, "camera position");

        let aim = lerp_toward(self.look_at, self.look_at_target(section), t);
        self.look_at = finite_vec3_or(aim, self.look_at, "camera look-at");
        camera.look_at_point(self.look_at);

        let (tilt_x, tilt_z) = if reduced {
            (0.0, 0.0)
        } else {
            (
                input.pointer.y * self.config.tilt_pitch_gain,
                -input.pointer.x * self.config.tilt_roll_gain,
            )
        };
        let blend = self.config.tilt_blend;
        let next_x = tilt.rotation.x + (tilt_x - tilt.rotation.x) * blend;
        let next_z = tilt.rotation.z + (tilt_z - tilt.rotation.z) * blend;
        if next_x.is_finite() && next_z.is_finite() {
            tilt.rotation.x = next_x;
            tilt.rotation.z = next_z;
        }
    }
}
