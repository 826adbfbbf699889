//! Environment recycling: fixed-size pools of clouds, ground chunks and
//! precipitation particles that are repositioned around the moving camera so
//! the world looks endless while each frame costs `O(pool size)`.
//!
//! Clouds and ground chunks live in world space and are moved ahead of the
//! camera once they fall far enough behind it (see [`recycle`]). Particles
//! live in camera space and wrap inside a box around the camera.

pub mod chunks;
pub mod clouds;
pub mod error;
pub mod instance;
pub mod pool;
pub mod precipitation;
pub mod recycle;
mod world;

pub use chunks::{ChunkLayout, ChunkPool, GroundChunk};
pub use clouds::{Cloud, CloudPool, CloudShape};
pub use error::EnvironmentError;
pub use instance::InstanceRaw;
pub use pool::Pool;
pub use precipitation::{Particle, PrecipitationPool};
pub use recycle::{CameraFrame, RecycleRule, SpawnEnvelope};
pub use world::{Environment, EnvironmentSettings};
