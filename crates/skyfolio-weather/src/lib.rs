//! Weather presets: the static table mapping a [`WeatherKind`] tag to the
//! visual parameters of the sky, fog, lights and recycled scenery.

mod profile;

pub use profile::{GroundStyle, Precipitation, WeatherProfile, profile};
pub use skyfolio_scene::WeatherKind;
