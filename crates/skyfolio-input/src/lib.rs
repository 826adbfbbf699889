//! Input sampling: held keys, the normalized pointer, and the reduced-motion
//! preference, folded into one immutable [`InputSnapshot`] per frame.

pub mod keyboard;
pub mod motion;
pub mod pointer;
pub mod snapshot;

pub use keyboard::{KeyboardState, RawKeyEvent};
pub use motion::MotionPreference;
pub use pointer::PointerState;
pub use snapshot::{FlightControls, InputSampler, InputSnapshot};
