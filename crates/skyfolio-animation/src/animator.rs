use skyfolio_camera::{ChoreographyConfig, Choreographer};
use skyfolio_environment::{Environment, EnvironmentError, EnvironmentSettings};
use skyfolio_flight::{FlightConfig, FlightIntegrator};
use skyfolio_input::InputSnapshot;
use skyfolio_motion::{IdleMotion, IdleMotionConfig};
use skyfolio_scene::{CameraState, FrameTime, Mode, PlaneRig, Section, Transform, WeatherKind};
use skyfolio_weather::{WeatherProfile, profile};
use tracing::{info, warn};

use crate::clock::FrameClock;
use crate::session::{DEFAULT_START_DELAY, Session};
use crate::strategy::CameraStrategy;

/// Everything needed to build a [`SceneAnimator`].
#[derive(Debug, Clone)]
pub struct AnimatorSettings {
    pub section: Section,
    pub weather: WeatherKind,
    pub free_flight: bool,
    /// Seconds between "start flight" and leaving home.
    pub start_delay: f32,
    pub choreography: ChoreographyConfig,
    pub flight: FlightConfig,
    pub idle: IdleMotionConfig,
    pub environment: EnvironmentSettings,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            section: Section::Home,
            weather: WeatherKind::default(),
            free_flight: false,
            start_delay: DEFAULT_START_DELAY,
            choreography: ChoreographyConfig::default(),
            flight: FlightConfig::default(),
            idle: IdleMotionConfig::default(),
            environment: EnvironmentSettings::default(),
        }
    }
}

/// Owns all per-frame animation state and runs the single update pass.
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    session: Session,
    clock: FrameClock,
    choreographer: Choreographer,
    flight: FlightIntegrator,
    idle: IdleMotion,
    environment: Environment,
    camera: CameraState,
    rig: PlaneRig,
    // Mode that wrote the camera last frame; `None` before the first frame.
    active_mode: Option<Mode>,
}

impl SceneAnimator {
    /// Builds the animator with the camera at its initial position.
    pub fn new(settings: AnimatorSettings) -> Result<Self, EnvironmentError> {
        let camera = CameraState::default();
        let environment = Environment::new(settings.environment, &camera)?;
        let mut session = Session::new(settings.section, settings.weather, settings.start_delay);
        session.set_free_flight(settings.free_flight);

        info!(
            "Animator ready: section {}, weather {}, mode {:?}",
            session.section(),
            session.weather(),
            session.mode()
        );
        Ok(Self {
            session,
            clock: FrameClock::new(),
            choreographer: Choreographer::new(settings.choreography),
            flight: FlightIntegrator::new(settings.flight),
            idle: IdleMotion::new(settings.idle),
            environment,
            camera,
            rig: PlaneRig::default(),
            active_mode: None,
        })
    }

    /// Advances the internal clock by `frame_time` seconds and runs one
    /// update pass.
    pub fn advance(&mut self, frame_time: f32, input: &InputSnapshot) -> CameraStrategy {
        let time = self.clock.advance(frame_time);
        self.update(time, input)
    }

    /// Runs one animation pass for `time` with this frame's input snapshot.
    /// Returns the strategy that wrote the camera.
    pub fn update(&mut self, time: FrameTime, input: &InputSnapshot) -> CameraStrategy {
        let previous_camera = self.camera;
        let previous_rig = self.rig;

        self.session.tick(time.delta);

        let strategy = CameraStrategy::select(&self.session);
        self.switch_mode(strategy.mode());
        match strategy {
            CameraStrategy::PortfolioChoreography(section) => self.choreographer.update(
                section,
                time,
                input,
                &mut self.camera,
                &mut self.rig.tilt,
            ),
            CameraStrategy::FreeFlightIntegration => {
                self.flight.update(time, input, &mut self.camera, &mut self.rig.body);
            }
        }

        let weather = profile(self.session.weather());
        self.environment.update(&self.camera, time, weather);
        self.idle.update(
            time,
            self.session.propeller_engaged(),
            input.reduced_motion,
            &mut self.rig,
        );

        if !self.camera.is_finite() {
            warn!("Non-finite camera after {strategy:?}, restoring previous frame");
            self.camera = previous_camera;
        }
        if !self.rig.is_finite() {
            warn!("Non-finite plane rig after {strategy:?}, restoring previous frame");
            self.rig = previous_rig;
        }
        strategy
    }

    /// Mode change bookkeeping, run before the new strategy writes.
    fn switch_mode(&mut self, mode: Mode) {
        let previous = self.active_mode.replace(mode);
        if previous == Some(mode) {
            return;
        }
        match mode {
            Mode::FreeFlight => {
                self.flight.engage();
                // The body takes over; pointer tilt would skew the heading.
                self.rig.tilt = Transform::IDENTITY;
            }
            Mode::Portfolio => {
                if previous == Some(Mode::FreeFlight) {
                    self.flight.disengage(&mut self.rig.body);
                }
                self.choreographer.resume_from(&self.camera);
            }
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// UI-side access to section, mode and weather selections.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    #[must_use]
    pub fn rig(&self) -> &PlaneRig {
        &self.rig
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    #[must_use]
    pub fn choreographer(&self) -> &Choreographer {
        &self.choreographer
    }

    #[must_use]
    pub fn flight(&self) -> &FlightIntegrator {
        &self.flight
    }

    #[must_use]
    pub fn idle(&self) -> &IdleMotion {
        &self.idle
    }

    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Visual parameters of the current weather.
    #[must_use]
    pub fn weather_profile(&self) -> &'static WeatherProfile {
        profile(self.session.weather())
    }
}
