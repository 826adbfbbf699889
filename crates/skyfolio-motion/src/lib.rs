//! Idle Motion Layer: cosmetic oscillators on the plane rig.
//!
//! Each oscillator writes its own layer of the [`PlaneRig`](skyfolio_scene::PlaneRig)
//! (propeller, engine glow, float), so it composes with the pointer tilt and
//! the flight body instead of overwriting them. Star and cloud drift angles
//! are kept alongside for the renderer.

mod layer;
pub mod oscillators;

pub use layer::{IdleMotion, IdleMotionConfig, SkyDrift};
