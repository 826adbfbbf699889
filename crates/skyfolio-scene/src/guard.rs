//! Finite-value guards.
//!
//! A NaN written into a transform corrupts every later frame, so values
//! produced by the integrators pass through these helpers before they are
//! stored.

use glam::Vec3;
use tracing::warn;

/// Returns `value` if finite, otherwise `fallback`.
#[must_use]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Returns `value` if every component is finite, otherwise `fallback`.
///
/// `what` names the rejected quantity in the warning.
#[must_use]
pub fn finite_vec3_or(value: Vec3, fallback: Vec3, what: &str) -> Vec3 {
    if value.is_finite() {
        value
    } else {
        warn!("Rejected non-finite {what}: {value:?}, keeping {fallback:?}");
        fallback
    }
}
