//! Shared frame state for the Skyfolio scene: transforms, the camera, the
//! closed set of content sections and modes, and plain-data blueprints of the
//! static geometry the renderer draws.

pub mod blueprint;
pub mod camera;
pub mod color;
pub mod guard;
pub mod section;
pub mod time;
pub mod transform;

pub use blueprint::{Blueprint, Material, Primitive, ShapeNode};
pub use camera::CameraState;
pub use color::Rgb;
pub use guard::{finite_or, finite_vec3_or};
pub use section::{Mode, ParseTagError, Section, WeatherKind};
pub use time::FrameTime;
pub use transform::{PlaneRig, Transform};
