use skyfolio_scene::{CameraState, FrameTime};
use skyfolio_weather::WeatherProfile;
use tracing::{info, warn};

use crate::chunks::{CHUNK_RULE, ChunkPool};
use crate::clouds::{CLOUD_OPACITY, CLOUD_RULE, CloudPool};
use crate::error::EnvironmentError;
use crate::precipitation::{PARTICLE_HALF_EXTENTS, PrecipitationPool};
use crate::recycle::CameraFrame;

// Distinct streams per pool from one configured seed.
const CLOUD_SALT: u64 = 0x636c_6f75_6473;
const CHUNK_SALT: u64 = 0x6368_756e_6b73;
const PARTICLE_SALT: u64 = 0x7061_7274_6963;

/// Pool sizes and the placement seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentSettings {
    pub seed: u64,
    pub cloud_count: usize,
    pub chunk_count: usize,
    pub particle_count: usize,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            cloud_count: 24,
            chunk_count: 16,
            particle_count: 600,
        }
    }
}

/// All recycled scenery around the camera.
#[derive(Debug, Clone)]
pub struct Environment {
    clouds: CloudPool,
    chunks: ChunkPool,
    precipitation: PrecipitationPool,
}

impl Environment {
    /// Builds every pool around the initial `camera`.
    pub fn new(
        settings: EnvironmentSettings,
        camera: &CameraState,
    ) -> Result<Self, EnvironmentError> {
        let frame = CameraFrame::from_camera(camera);
        let environment = Self {
            clouds: CloudPool::new(
                settings.cloud_count,
                settings.seed ^ CLOUD_SALT,
                CLOUD_RULE,
                &frame,
            )?,
            chunks: ChunkPool::new(
                settings.chunk_count,
                settings.seed ^ CHUNK_SALT,
                CHUNK_RULE,
                &frame,
            )?,
            precipitation: PrecipitationPool::new(
                settings.particle_count,
                settings.seed ^ PARTICLE_SALT,
                PARTICLE_HALF_EXTENTS,
            )?,
        };
        info!(
            "Environment seeded with {}: {} clouds, {} chunks, {} particles",
            settings.seed, settings.cloud_count, settings.chunk_count, settings.particle_count
        );
        Ok(environment)
    }

    /// Recycles every pool against this frame's camera and rewrites the
    /// instance buffers for `profile`.
    pub fn update(&mut self, camera: &CameraState, time: FrameTime, profile: &WeatherProfile) {
        if !camera.is_finite() {
            warn!("Skipping environment update: camera is not finite");
            return;
        }
        let frame = CameraFrame::from_camera(camera);
        self.clouds.update(&frame);
        self.chunks.update(&frame);
        self.precipitation.set_kind(profile.precipitation);
        self.precipitation.update(camera.position, time);

        let tint = profile.scenery_tint;
        self.clouds.refresh_instances(tint.to_rgba(CLOUD_OPACITY));
        self.chunks.refresh_instances(profile.ground, tint.to_rgba(1.0));
        let visible = profile.visible_particles(self.precipitation.particles().len());
        self.precipitation.refresh_instances(camera.position, visible);
    }

    #[must_use]
    pub fn clouds(&self) -> &CloudPool {
        &self.clouds
    }

    #[must_use]
    pub fn chunks(&self) -> &ChunkPool {
        &self.chunks
    }

    #[must_use]
    pub fn precipitation(&self) -> &PrecipitationPool {
        &self.precipitation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use skyfolio_weather::{Precipitation, WeatherKind, profile};

    const DT: f32 = 1.0 / 60.0;

    fn settings() -> EnvironmentSettings {
        EnvironmentSettings {
            seed: 11,
            cloud_count: 16,
            chunk_count: 12,
            particle_count: 100,
        }
    }

    fn camera_at(z: f32) -> CameraState {
        CameraState::new(Vec3::new(0.0, 0.0, z), Vec3::new(0.0, 0.0, z + 10.0))
    }

    fn behind(position: Vec3, camera: &CameraState) -> f32 {
        -(position - camera.position).dot(camera.forward())
    }

    #[test]
    fn test_nothing_drifts_far_behind() {
        let speed = 3.0;
        let mut env = Environment::new(settings(), &camera_at(0.0)).unwrap();
        let day = profile(WeatherKind::Day);
        for i in 0..3000 {
            let camera = camera_at(i as f32 * speed);
            env.update(&camera, FrameTime::new(i as f32 * DT, DT), day);
            let cloud_limit = env.clouds().rule().distance + speed;
            for cloud in env.clouds().clouds() {
                assert!(behind(cloud.position, &camera) <= cloud_limit);
            }
            let chunk_limit = env.chunks().rule().distance + speed;
            for chunk in env.chunks().chunks() {
                assert!(behind(chunk.position, &camera) <= chunk_limit);
            }
        }
        assert!(env.clouds().recycled() > 0);
        assert!(env.chunks().recycled() > 0);
    }

    #[test]
    fn test_cardinality_is_fixed() {
        let mut env = Environment::new(settings(), &camera_at(0.0)).unwrap();
        for i in 0..500 {
            let kind = WeatherKind::ALL[i / 100];
            env.update(&camera_at(i as f32 * 4.0), FrameTime::new(i as f32 * DT, DT), profile(kind));
            assert_eq!(env.clouds().clouds().len(), 16);
            assert_eq!(env.chunks().chunks().len(), 12);
            assert_eq!(env.precipitation().particles().len(), 100);
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let run = || {
            let mut env = Environment::new(settings(), &camera_at(0.0)).unwrap();
            for i in 0..400 {
                env.update(
                    &camera_at(i as f32 * 2.5),
                    FrameTime::new(i as f32 * DT, DT),
                    profile(WeatherKind::Rainy),
                );
            }
            env
        };
        let (a, b) = (run(), run());
        assert_eq!(a.clouds().clouds(), b.clouds().clouds());
        assert_eq!(a.chunks().chunks(), b.chunks().chunks());
        assert_eq!(a.precipitation().particles(), b.precipitation().particles());
        assert_eq!(a.clouds().instance_bytes(), b.clouds().instance_bytes());
    }

    #[test]
    fn test_weather_drives_particles() {
        let mut env = Environment::new(settings(), &camera_at(0.0)).unwrap();
        env.update(&camera_at(0.0), FrameTime::new(0.0, DT), profile(WeatherKind::Day));
        assert!(env.precipitation().instances().is_empty());

        env.update(&camera_at(1.0), FrameTime::new(DT, DT), profile(WeatherKind::Rainy));
        assert_eq!(env.precipitation().kind(), Precipitation::Rain);
        assert_eq!(env.precipitation().instances().len(), 100);

        env.update(&camera_at(2.0), FrameTime::new(2.0 * DT, DT), profile(WeatherKind::Sakura));
        assert_eq!(env.precipitation().instances().len(), 60);
    }

    #[test]
    fn test_non_finite_camera_is_ignored() {
        let mut env = Environment::new(settings(), &camera_at(0.0)).unwrap();
        let before = env.clouds().clouds().clone();
        let bad = CameraState::new(Vec3::NAN, Vec3::ZERO);
        env.update(&bad, FrameTime::new(0.0, DT), profile(WeatherKind::Day));
        assert_eq!(&before, env.clouds().clouds());
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let settings = EnvironmentSettings {
            chunk_count: 0,
            ..settings()
        };
        let err = Environment::new(settings, &camera_at(0.0)).unwrap_err();
        assert_eq!(err, EnvironmentError::EmptyPool { pool: "ground chunk" });
    }
}
