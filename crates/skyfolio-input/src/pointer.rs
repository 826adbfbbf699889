//! Pointer tracker producing a normalized position in `[-1, 1] × [-1, 1]`.
//!
//! `x` grows to the right and `y` grows upward, so the top-right corner of the
//! viewport is `(1, 1)`.

use glam::Vec2;

/// Cursor position in window pixels plus the viewport size needed to
/// normalize it.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    position: Vec2,
    viewport: Vec2,
    inside: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    /// Creates a tracker with the cursor centered in a 1×1 viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec2::splat(0.5),
            viewport: Vec2::ONE,
            inside: false,
        }
    }

    /// Process a `Resized` event.
    pub fn on_resized(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
    }

    /// Process a `CursorEntered` event.
    pub fn on_cursor_entered(&mut self) {
        self.inside = true;
    }

    /// Process a `CursorLeft` event. The last position is kept, as the page
    /// pointer keeps its last coordinates.
    pub fn on_cursor_left(&mut self) {
        self.inside = false;
    }

    /// Whether the cursor is inside the window.
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Normalized pointer position, clamped to `[-1, 1]` on both axes.
    #[must_use]
    pub fn normalized(&self) -> Vec2 {
        let ndc = Vec2::new(
            self.position.x / self.viewport.x * 2.0 - 1.0,
            -(self.position.y / self.viewport.y) * 2.0 + 1.0,
        );
        if ndc.is_finite() {
            ndc.clamp(Vec2::NEG_ONE, Vec2::ONE)
        } else {
            Vec2::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_zero() {
        let mut p = PointerState::new();
        p.on_resized(800, 600);
        p.on_cursor_moved(400.0, 300.0);
        assert_eq!(p.normalized(), Vec2::ZERO);
    }

    #[test]
    fn test_top_right_is_positive() {
        let mut p = PointerState::new();
        p.on_resized(800, 600);
        p.on_cursor_moved(800.0, 0.0);
        assert_eq!(p.normalized(), Vec2::ONE);
    }

    #[test]
    fn test_outside_window_is_clamped() {
        let mut p = PointerState::new();
        p.on_resized(100, 100);
        p.on_cursor_moved(-500.0, 900.0);
        assert_eq!(p.normalized(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_zero_size_viewport_is_safe() {
        let mut p = PointerState::new();
        p.on_resized(0, 0);
        p.on_cursor_moved(f64::NAN, 0.0);
        assert_eq!(p.normalized(), Vec2::ZERO);
    }

    #[test]
    fn test_enter_leave() {
        let mut p = PointerState::new();
        p.on_cursor_entered();
        assert!(p.is_inside());
        p.on_cursor_left();
        assert!(!p.is_inside());
    }
}
