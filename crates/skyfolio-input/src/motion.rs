//! The host's reduced-motion accessibility preference.

use tracing::info;

/// Latest value of the platform's "reduce motion" signal.
///
/// The host pushes a new value whenever the platform reports a change; the
/// value is read once per frame through the [`InputSnapshot`](crate::InputSnapshot).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionPreference {
    reduced: bool,
}

impl MotionPreference {
    /// Creates a preference with the given initial value.
    #[must_use]
    pub fn new(reduced: bool) -> Self {
        Self { reduced }
    }

    /// Records a platform change notification. Returns `true` if the value
    /// actually changed.
    pub fn on_changed(&mut self, reduced: bool) -> bool {
        if self.reduced == reduced {
            return false;
        }
        self.reduced = reduced;
        info!("Reduced motion {}", if reduced { "enabled" } else { "disabled" });
        true
    }

    /// Whether non-essential animation should be suppressed.
    #[must_use]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_detection() {
        let mut pref = MotionPreference::default();
        assert!(!pref.is_reduced());
        assert!(pref.on_changed(true));
        assert!(pref.is_reduced());
        assert!(!pref.on_changed(true));
        assert!(pref.on_changed(false));
    }
}
