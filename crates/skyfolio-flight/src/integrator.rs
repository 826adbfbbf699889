use std::f32::consts::{FRAC_PI_4, PI, TAU};

use glam::{EulerRot, Quat, Vec3};
use skyfolio_input::InputSnapshot;
use skyfolio_scene::{CameraState, FrameTime, Transform, finite_or, finite_vec3_or};
use tracing::{info, warn};

/// The plane's nose points down its local `+Z`.
pub const LOCAL_FORWARD: Vec3 = Vec3::Z;

/// Tuning for [`FlightIntegrator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightConfig {
    /// Pitch rate in rad/s while up or down is held.
    pub pitch_rate: f32,
    /// Symmetric pitch limit in radians. Keeps the plane from looping.
    pub pitch_limit: f32,
    /// Bank rate in rad/s while turning.
    pub roll_rate: f32,
    /// Symmetric bank limit in radians.
    pub roll_limit: f32,
    /// Auto-level decay rate per second when no turn key is held.
    pub level_rate: f32,
    /// Heading change in rad/s while turning.
    pub yaw_rate: f32,
    /// Forward distance covered per frame.
    ///
    /// This is per frame, not per second, so cruise speed follows the refresh
    /// rate.
    pub speed: f32,
    /// Chase camera offset in the plane's frame: behind and above.
    pub chase_offset: Vec3,
    /// Per-frame blend of the chase camera toward its target.
    ///
    /// Not scaled by `dt`, unlike the portfolio choreographer, so the chase
    /// lag is shorter in wall time on faster displays.
    pub chase_blend: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            pitch_rate: 1.2,
            pitch_limit: FRAC_PI_4,
            roll_rate: 2.0,
            roll_limit: 0.8,
            level_rate: 3.0,
            yaw_rate: 1.0,
            speed: 0.5,
            chase_offset: Vec3::new(0.0, 3.0, -10.0),
            chase_blend: 0.1,
        }
    }
}

/// Kinematic flight state.
///
/// `orientation` holds `(pitch, yaw, roll)` in radians: positive pitch raises
/// the nose, positive yaw turns left, positive roll banks right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    /// Forward distance per frame.
    pub speed: f32,
    /// World position.
    pub position: Vec3,
    /// `(pitch, yaw, roll)`.
    pub orientation: Vec3,
    /// Displacement applied in the last frame.
    pub velocity: Vec3,
}

impl FlightState {
    /// At the origin, level, heading down `+Z`.
    #[must_use]
    pub fn at_origin(speed: f32) -> Self {
        Self {
            speed,
            position: Vec3::ZERO,
            orientation: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }

    /// Nose pitch in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.orientation.x
    }

    /// Heading in radians, wrapped to `[-π, π)`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.orientation.y
    }

    /// Bank in radians.
    #[must_use]
    pub fn roll(&self) -> f32 {
        self.orientation.z
    }

    /// Orientation as a quaternion: heading, then pitch, then bank.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw(), -self.pitch(), self.roll())
    }

    /// Unit forward vector. Falls back to [`LOCAL_FORWARD`] if the rotation
    /// is degenerate.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.rotation() * LOCAL_FORWARD)
            .try_normalize()
            .unwrap_or(LOCAL_FORWARD)
    }
}

/// Wraps an angle to `[-π, π)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Free-flight controller. Owns [`FlightState`] exclusively.
#[derive(Debug, Clone)]
pub struct FlightIntegrator {
    config: FlightConfig,
    state: FlightState,
}

impl Default for FlightIntegrator {
    fn default() -> Self {
        Self::new(FlightConfig::default())
    }
}

impl FlightIntegrator {
    /// Creates an integrator with the plane at the origin.
    #[must_use]
    pub fn new(config: FlightConfig) -> Self {
        Self {
            state: FlightState::at_origin(config.speed),
            config,
        }
    }

    /// The tuning in use.
    #[must_use]
    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    /// Current flight state.
    #[must_use]
    pub fn state(&self) -> &FlightState {
        &self.state
    }

    /// Entering free flight: the plane restarts level at the origin.
    pub fn engage(&mut self) {
        self.state = FlightState::at_origin(self.config.speed);
        info!("Free flight engaged");
    }

    /// Leaving free flight: the plane body returns to the origin.
    pub fn disengage(&mut self, body: &mut Transform) {
        *body = Transform::IDENTITY;
        info!(
            "Free flight disengaged at ({:.1}, {:.1}, {:.1})",
            self.state.position.x, self.state.position.y, self.state.position.z
        );
    }

    /// Integrates one frame of input, then moves the plane body and the
    /// chase camera.
    pub fn update(
        &mut self,
        time: FrameTime,
        input: &InputSnapshot,
        camera: &mut CameraState,
        body: &mut Transform,
    ) {
        self.steer(time.delta, input);
        self.advance();

        let rotation = self.state.rotation();
        body.position = self.state.position;
        body.set_quat(rotation);

        let chase_target = self.state.position + rotation * self.config.chase_offset;
        let eye = camera.position.lerp(chase_target, self.config.chase_blend);
        camera.position = finite_vec3_or(eye, camera.position, "chase camera position");
        camera.look_at_point(self.state.position);
    }

    fn steer(&mut self, dt: f32, input: &InputSnapshot) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let cfg = &self.config;
        let controls = input.controls;

        let mut orientation = self.state.orientation;
        if !orientation.is_finite() {
            warn!("Non-finite flight orientation {orientation:?}, leveling");
            orientation = Vec3::new(
                finite_or(orientation.x, 0.0),
                finite_or(orientation.y, 0.0),
                finite_or(orientation.z, 0.0),
            );
        }

        let pitch = orientation.x + controls.pitch_axis() * cfg.pitch_rate * dt;
        orientation.x = pitch.clamp(-cfg.pitch_limit, cfg.pitch_limit);

        if controls.left || controls.right {
            let turn = controls.turn_axis();
            orientation.z = (orientation.z - turn * cfg.roll_rate * dt)
                .clamp(-cfg.roll_limit, cfg.roll_limit);
            orientation.y = wrap_angle(orientation.y + turn * cfg.yaw_rate * dt);
        } else {
            let decay = (cfg.level_rate * dt).min(1.0);
            orientation.z -= orientation.z * decay;
        }

        self.state.orientation = orientation;
    }

    fn advance(&mut self) {
        let forward = self.state.forward();
        let velocity = forward * self.state.speed;
        let position = self.state.position + velocity;
        if position.is_finite() {
            self.state.velocity = velocity;
            self.state.position = position;
        } else {
            warn!("Non-finite flight position, holding {:?}", self.state.position);
            self.state.velocity = Vec3::ZERO;
        }
    }
}
