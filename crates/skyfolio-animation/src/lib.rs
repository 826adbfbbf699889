//! The per-frame animation pass.
//!
//! [`SceneAnimator::update`] is the only place that mutates the camera and
//! the plane rig. Each frame it fires the pending start timer, dispatches
//! exactly one camera-writing strategy, recycles the environment around the
//! resulting camera, and runs the idle oscillators.

mod animator;
pub mod clock;
pub mod session;
mod strategy;
pub mod timer;

pub use animator::{AnimatorSettings, SceneAnimator};
pub use clock::{FrameClock, MAX_FRAME_TIME};
pub use session::Session;
pub use strategy::CameraStrategy;
pub use timer::OneShotTimer;
