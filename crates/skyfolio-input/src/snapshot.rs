//! Per-frame input snapshot.
//!
//! The host forwards window events into an [`InputSampler`] between frames.
//! At the start of a frame it calls [`InputSampler::sample`] exactly once and
//! hands the resulting [`InputSnapshot`] to every component, so all readers
//! see the same input for the whole frame.

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::keyboard::{KeyboardState, RawKeyEvent};
use crate::motion::MotionPreference;
use crate::pointer::PointerState;

const UP_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];

/// Held directional controls, WASD or arrows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightControls {
    /// Nose up.
    pub up: bool,
    /// Nose down.
    pub down: bool,
    /// Bank and turn left.
    pub left: bool,
    /// Bank and turn right.
    pub right: bool,
}

impl FlightControls {
    /// Net pitch input: `+1` up, `-1` down, `0` for none or both.
    #[must_use]
    pub fn pitch_axis(&self) -> f32 {
        f32::from(i8::from(self.up) - i8::from(self.down))
    }

    /// Net turn input: `+1` left, `-1` right, `0` for none or both.
    #[must_use]
    pub fn turn_axis(&self) -> f32 {
        f32::from(i8::from(self.left) - i8::from(self.right))
    }
}

/// Everything the animation core reads from the user in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Held directional keys.
    pub controls: FlightControls,
    /// Pointer in `[-1, 1] × [-1, 1]`, `y` up.
    pub pointer: Vec2,
    /// Reduced-motion accessibility flag.
    pub reduced_motion: bool,
}

/// Accumulates raw input between frames.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    keyboard: KeyboardState,
    pointer: PointerState,
    motion: MotionPreference,
}

impl InputSampler {
    /// Creates a sampler with the given initial reduced-motion value.
    #[must_use]
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            motion: MotionPreference::new(reduced_motion),
            ..Self::default()
        }
    }

    /// Mutable access to the keyboard tracker, for forwarding events.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    /// Mutable access to the pointer tracker, for forwarding events.
    pub fn pointer_mut(&mut self) -> &mut PointerState {
        &mut self.pointer
    }

    /// Mutable access to the motion preference, for change notifications.
    pub fn motion_mut(&mut self) -> &mut MotionPreference {
        &mut self.motion
    }

    /// Shorthand for `keyboard_mut().process_raw(event)`.
    pub fn key(&mut self, event: RawKeyEvent) {
        self.keyboard.process_raw(event);
    }

    /// Freezes the current input into a snapshot.
    #[must_use]
    pub fn sample(&self) -> InputSnapshot {
        InputSnapshot {
            controls: FlightControls {
                up: self.keyboard.any_held(&UP_KEYS),
                down: self.keyboard.any_held(&DOWN_KEYS),
                left: self.keyboard.any_held(&LEFT_KEYS),
                right: self.keyboard.any_held(&RIGHT_KEYS),
            },
            pointer: self.pointer.normalized(),
            reduced_motion: self.motion.is_reduced(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_bind_same_controls() {
        let mut sampler = InputSampler::default();
        sampler.key(RawKeyEvent::press(KeyCode::KeyW));
        sampler.key(RawKeyEvent::press(KeyCode::ArrowLeft));
        let snap = sampler.sample();
        assert!(snap.controls.up);
        assert!(snap.controls.left);
        assert!(!snap.controls.down);
        assert!(!snap.controls.right);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let controls = FlightControls {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(controls.pitch_axis(), 0.0);
        assert_eq!(controls.turn_axis(), 0.0);
    }

    #[test]
    fn test_axes_signs() {
        let controls = FlightControls {
            up: true,
            right: true,
            ..FlightControls::default()
        };
        assert_eq!(controls.pitch_axis(), 1.0);
        assert_eq!(controls.turn_axis(), -1.0);
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let mut sampler = InputSampler::new(true);
        let before = sampler.sample();
        sampler.key(RawKeyEvent::press(KeyCode::KeyD));
        assert!(!before.controls.right);
        assert!(before.reduced_motion);
        assert!(sampler.sample().controls.right);
    }

    #[test]
    fn test_pointer_flows_into_snapshot() {
        let mut sampler = InputSampler::default();
        sampler.pointer_mut().on_resized(200, 100);
        sampler.pointer_mut().on_cursor_moved(200.0, 50.0);
        assert_eq!(sampler.sample().pointer, Vec2::new(1.0, 0.0));
    }
}
