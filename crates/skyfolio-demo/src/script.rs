//! Timed cues for the headless session.

use skyfolio_animation::SceneAnimator;
use skyfolio_input::{InputSampler, RawKeyEvent};
use skyfolio_scene::{Section, WeatherKind};
use winit::keyboard::KeyCode;

/// Something the visitor does at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    StartFlight,
    Navigate(Section),
    FreeFlight(bool),
    Weather(WeatherKind),
    Press(KeyCode),
    Release(KeyCode),
    /// Cursor position in window pixels.
    Pointer(f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    /// Seconds since the session started.
    pub at: f32,
    pub action: Action,
}

const fn cue(at: f32, action: Action) -> Cue {
    Cue { at, action }
}

/// Cues ordered by time, consumed as the clock passes them.
#[derive(Debug, Clone)]
pub struct Script {
    cues: Vec<Cue>,
    next: usize,
}

impl Script {
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { cues, next: 0 }
    }

    /// The tour: land on home, start flight, browse two sections, fly with
    /// WASD through a weather change, then return to the portfolio.
    pub fn tour() -> Self {
        use Action::*;
        Self::new(vec![
            cue(0.5, Pointer(960.0, 200.0)),
            cue(1.0, StartFlight),
            cue(3.0, Navigate(Section::Projects)),
            cue(4.5, Weather(WeatherKind::Sunset)),
            cue(5.0, Navigate(Section::Skills)),
            cue(7.0, FreeFlight(true)),
            cue(7.5, Press(KeyCode::KeyW)),
            cue(8.5, Release(KeyCode::KeyW)),
            cue(9.0, Press(KeyCode::KeyA)),
            cue(11.0, Weather(WeatherKind::Rainy)),
            cue(12.0, Release(KeyCode::KeyA)),
            cue(12.0, Press(KeyCode::ArrowDown)),
            cue(13.0, Press(KeyCode::KeyD)),
            cue(14.0, Release(KeyCode::ArrowDown)),
            cue(15.0, Release(KeyCode::KeyD)),
            cue(15.5, Weather(WeatherKind::Sakura)),
            cue(17.0, FreeFlight(false)),
            cue(18.0, Navigate(Section::Contact)),
        ])
    }

    /// Cues whose time is at or before `elapsed` and have not run yet.
    pub fn due(&mut self, elapsed: f32) -> &[Cue] {
        let start = self.next;
        while self.next < self.cues.len() && self.cues[self.next].at <= elapsed {
            self.next += 1;
        }
        &self.cues[start..self.next]
    }

    pub fn is_finished(&self) -> bool {
        self.next == self.cues.len()
    }
}

/// Routes an action to the session or the input sampler.
pub fn apply(action: Action, animator: &mut SceneAnimator, input: &mut InputSampler) {
    let session = animator.session_mut();
    match action {
        Action::StartFlight => session.request_start_flight(),
        Action::Navigate(section) => session.navigate(section),
        Action::FreeFlight(enabled) => session.set_free_flight(enabled),
        Action::Weather(weather) => session.set_weather(weather),
        Action::Press(code) => input.key(RawKeyEvent::press(code)),
        Action::Release(code) => input.key(RawKeyEvent::release(code)),
        Action::Pointer(x, y) => input.pointer_mut().on_cursor_moved(x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_run_once_in_order() {
        let mut script = Script::new(vec![
            cue(2.0, Action::StartFlight),
            cue(1.0, Action::FreeFlight(true)),
            cue(1.0, Action::Weather(WeatherKind::Day)),
        ]);
        assert!(script.due(0.5).is_empty());
        let first: Vec<_> = script.due(1.0).iter().map(|c| c.action).collect();
        assert_eq!(
            first,
            vec![Action::FreeFlight(true), Action::Weather(WeatherKind::Day)]
        );
        assert!(script.due(1.5).is_empty());
        assert_eq!(script.due(10.0).len(), 1);
        assert!(script.is_finished());
        assert!(script.due(20.0).is_empty());
    }

    #[test]
    fn test_tour_ends_in_portfolio() {
        let mut script = Script::tour();
        let last_mode = script
            .due(f32::MAX)
            .iter()
            .filter_map(|c| match c.action {
                Action::FreeFlight(enabled) => Some(enabled),
                _ => None,
            })
            .last();
        assert_eq!(last_mode, Some(false));
    }
}
