//! Held-key tracker.
//!
//! [`KeyboardState`] folds winit key events into the set of physical keys that
//! are currently down. Physical codes are used so WASD sits under the same
//! fingers on every layout. Only "is it held" matters to the flight model, so
//! there is no per-frame edge tracking.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event, constructible without a window.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key went down or up.
    pub state: ElementState,
    /// Whether this is an OS auto-repeat.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// A non-repeat press of `code`.
    #[must_use]
    pub fn press(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// A release of `code`.
    #[must_use]
    pub fn release(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// The set of physical keys currently held.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Creates a tracker with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Processes a [`RawKeyEvent`]. Repeats carry no new information and are
    /// dropped.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                self.held.insert(event.key);
            }
            ElementState::Released => {
                self.held.remove(&event.key);
            }
        }
    }

    /// Returns `true` while `code` is held down.
    #[must_use]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&PhysicalKey::Code(code))
    }

    /// Returns `true` if any of `codes` is held.
    #[must_use]
    pub fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&code| self.is_held(code))
    }

    /// Releases everything, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
