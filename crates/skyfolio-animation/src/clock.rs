//! Frame clock turning host frame intervals into [`FrameTime`]s.
//!
//! The host measures wall-clock time; the clock only accumulates the deltas it
//! is handed, so tests drive it with explicit frame times.

use skyfolio_scene::FrameTime;
use tracing::warn;

/// Maximum frame time accepted in one step.
///
/// A tab coming back from the background can report seconds of delta; every
/// smoothing step would then jump straight to its target.
pub const MAX_FRAME_TIME: f32 = 0.25; // 250ms = 4 FPS minimum

/// Accumulated animation time.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    elapsed: f32,
    frame_count: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts one frame interval and returns the time for the frame.
    ///
    /// Intervals above [`MAX_FRAME_TIME`] are clamped; negative or
    /// non-finite intervals count as zero.
    pub fn advance(&mut self, frame_time: f32) -> FrameTime {
        let delta = if !frame_time.is_finite() || frame_time < 0.0 {
            warn!("Invalid frame time {frame_time}, treating as 0");
            0.0
        } else if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time
        };

        self.elapsed += delta;
        self.frame_count += 1;
        FrameTime::new(self.elapsed, delta)
    }

    /// Seconds of animation time so far.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames produced so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_accumulates_elapsed() {
        let mut clock = FrameClock::new();
        let mut last = FrameTime::default();
        for _ in 0..60 {
            last = clock.advance(DT);
        }
        assert_eq!(clock.frame_count(), 60);
        assert!((last.elapsed - 1.0).abs() < 1e-4);
        assert_eq!(last.delta, DT);
    }

    #[test]
    fn test_spike_is_clamped() {
        let mut clock = FrameClock::new();
        let time = clock.advance(1.0);
        assert_eq!(time.delta, MAX_FRAME_TIME);
        assert_eq!(clock.elapsed(), MAX_FRAME_TIME);
    }

    #[test]
    fn test_invalid_interval_is_zero() {
        let mut clock = FrameClock::new();
        clock.advance(0.1);
        for bad in [f32::NAN, f32::INFINITY, -0.5] {
            let time = clock.advance(bad);
            assert_eq!(time.delta, 0.0);
            assert!((time.elapsed - 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_variable_rate_sums() {
        let mut clock = FrameClock::new();
        for dt in [0.016, 0.033, 0.008, 0.1] {
            clock.advance(dt);
        }
        assert!((clock.elapsed() - 0.157).abs() < 1e-5);
        assert_eq!(clock.frame_count(), 4);
    }
}
