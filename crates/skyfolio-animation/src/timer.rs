//! One-shot countdown driven by frame deltas.

/// Fires exactly once per [`arm`](Self::arm), on the first tick that brings
/// the remaining time to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OneShotTimer {
    remaining: Option<f32>,
}

impl OneShotTimer {
    /// Starts counting down `seconds`. Re-arming restarts the countdown.
    pub fn arm(&mut self, seconds: f32) {
        self.remaining = Some(if seconds.is_finite() { seconds.max(0.0) } else { 0.0 });
    }

    /// Drops a pending countdown without firing.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left, if armed.
    #[must_use]
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Counts down `dt`. Returns `true` on the tick that fires.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let left = remaining - dt;
        if left <= 0.0 {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once() {
        let mut timer = OneShotTimer::default();
        timer.arm(0.8);
        let fired: Vec<bool> = (0..100).map(|_| timer.tick(1.0 / 60.0)).collect();
        assert_eq!(fired.iter().filter(|&&f| f).count(), 1);
        // 0.8 s at 60 Hz: the 48th tick (index 47) or the 49th, depending on rounding.
        let index = fired.iter().position(|&f| f).unwrap();
        assert!((47..=48).contains(&index), "fired at {index}");
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_unarmed_never_fires() {
        let mut timer = OneShotTimer::default();
        assert!(!(0..10).any(|_| timer.tick(1.0)));
    }

    #[test]
    fn test_cancel() {
        let mut timer = OneShotTimer::default();
        timer.arm(0.5);
        timer.tick(0.25);
        timer.cancel();
        assert!(!timer.tick(1.0));
    }

    #[test]
    fn test_zero_delay_fires_next_tick() {
        let mut timer = OneShotTimer::default();
        timer.arm(0.0);
        assert!(timer.tick(0.0));
        assert!(!timer.tick(0.0));
    }

    #[test]
    fn test_nan_delta_does_not_fire() {
        let mut timer = OneShotTimer::default();
        timer.arm(0.1);
        assert!(!timer.tick(f32::NAN));
        assert_eq!(timer.remaining(), Some(0.1));
    }
}
