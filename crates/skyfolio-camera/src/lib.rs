//! Portfolio-mode camera choreography: section-driven camera targets reached
//! by exponential smoothing, an idle wobble, and pointer parallax on the plane.

pub mod choreographer;
pub mod smoothing;

pub use choreographer::{Choreographer, ChoreographyConfig};
pub use smoothing::{blend_factor, lerp_toward};
