//! User-facing selections: active section, mode, weather, and the start
//! flight sequence.
//!
//! The surrounding UI calls these operations between frames. Nothing here
//! touches the camera; the animator reads the session once per frame.

use skyfolio_scene::{Mode, Section, WeatherKind};
use tracing::{debug, info};

use crate::timer::OneShotTimer;

/// Default delay between "start flight" and leaving the home section.
pub const DEFAULT_START_DELAY: f32 = 0.8;

/// Section/mode/weather selections plus the pending start timer.
#[derive(Debug, Clone)]
pub struct Session {
    section: Section,
    mode: Mode,
    weather: WeatherKind,
    has_started: bool,
    start_delay: f32,
    start_timer: OneShotTimer,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Section::Home, WeatherKind::default(), DEFAULT_START_DELAY)
    }
}

impl Session {
    /// A session showing `section` under `weather`, in portfolio mode.
    #[must_use]
    pub fn new(section: Section, weather: WeatherKind, start_delay: f32) -> Self {
        Self {
            section,
            mode: Mode::Portfolio,
            weather,
            has_started: section != Section::Home,
            start_delay,
            start_timer: OneShotTimer::default(),
        }
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn weather(&self) -> WeatherKind {
        self.weather
    }

    /// Whether the visitor has left the landing view at least once.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// Whether the start sequence is waiting for its delay.
    #[must_use]
    pub fn start_pending(&self) -> bool {
        self.start_timer.is_armed()
    }

    /// Whether the propeller runs at full speed: once the visitor has left
    /// the landing view, and throughout free flight.
    #[must_use]
    pub fn propeller_engaged(&self) -> bool {
        self.has_started || self.mode == Mode::FreeFlight
    }

    /// Shows `section`. A pending start sequence still fires afterwards.
    pub fn navigate(&mut self, section: Section) {
        if self.start_timer.is_armed() {
            debug!("Navigating to {section} with a start sequence pending");
        }
        self.show(section);
    }

    /// "Start flight": spins the engine up now and leaves the home section
    /// once the start delay has elapsed. A request while one is pending
    /// joins it instead of arming a second switch.
    pub fn request_start_flight(&mut self) {
        if self.start_timer.is_armed() {
            return;
        }
        self.has_started = true;
        self.start_timer.arm(self.start_delay);
        info!("Start flight requested, leaving home in {:.0}ms", self.start_delay * 1000.0);
    }

    /// Switches between portfolio and free-flight mode. Takes effect at the
    /// next animation pass.
    pub fn set_free_flight(&mut self, enabled: bool) {
        let mode = if enabled { Mode::FreeFlight } else { Mode::Portfolio };
        if mode != self.mode {
            info!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn set_weather(&mut self, weather: WeatherKind) {
        if weather != self.weather {
            info!("Weather {} -> {}", self.weather, weather);
            self.weather = weather;
        }
    }

    /// Advances the start timer. Returns the section switched to if it fired.
    pub fn tick(&mut self, dt: f32) -> Option<Section> {
        if self.start_timer.tick(dt) {
            info!("Start delay elapsed");
            self.show(Section::Experience);
            Some(Section::Experience)
        } else {
            None
        }
    }

    fn show(&mut self, section: Section) {
        if section != Section::Home {
            self.has_started = true;
        }
        if section != self.section {
            info!("Section {} -> {}", self.section, section);
            self.section = section;
        }
    }
}
