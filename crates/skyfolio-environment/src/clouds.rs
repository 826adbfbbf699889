//! Cloud clusters recycled ahead of the camera.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::error::EnvironmentError;
use crate::instance::{InstanceBuffer, InstanceRaw};
use crate::pool::Pool;
use crate::recycle::{CameraFrame, RecycleRule, SpawnEnvelope};

/// Upper bound on puffs per cloud.
pub const MAX_PUFFS: usize = 6;

/// Rendered opacity of cloud puffs.
pub const CLOUD_OPACITY: f32 = 0.4;

/// Recycle rule for clouds: recycled 80 units behind, respawned 120-180 ahead.
pub const CLOUD_RULE: RecycleRule = RecycleRule {
    behind_dot: -0.2,
    distance: 80.0,
    spawn: SpawnEnvelope {
        base_distance: 120.0,
        jitter: 60.0,
        lateral: 80.0,
        vertical_min: -10.0,
        vertical_max: 25.0,
        ground: None,
    },
};

/// One sphere of a cloud cluster, in cluster-local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Puff {
    pub offset: Vec3,
    pub radius: f32,
}

/// Seed-derived cloud silhouette. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudShape {
    puffs: [Puff; MAX_PUFFS],
    count: usize,
    /// Overall size multiplier.
    pub scale: f32,
}

impl CloudShape {
    /// Derives a shape from `seed`; equal seeds give equal shapes.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let count = rng.random_range(3..=MAX_PUFFS);
        let mut puffs = [Puff {
            offset: Vec3::ZERO,
            radius: 0.0,
        }; MAX_PUFFS];
        for (i, puff) in puffs.iter_mut().take(count).enumerate() {
            // Puffs spread along the cluster's long axis, slightly staggered.
            let along = i as f32 - (count as f32 - 1.0) * 0.5;
            puff.offset = Vec3::new(
                along * 1.6 + rng.random::<f32>() * 0.6 - 0.3,
                rng.random::<f32>() * 0.8 - 0.2,
                rng.random::<f32>() * 1.2 - 0.6,
            );
            puff.radius = 1.0 + rng.random::<f32>() * 0.8;
        }
        Self {
            puffs,
            count,
            scale: 2.0 + rng.random::<f32>() * 3.0,
        }
    }

    /// The puffs actually used by this shape.
    #[must_use]
    pub fn puffs(&self) -> &[Puff] {
        &self.puffs[..self.count]
    }
}

/// A pooled cloud cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    /// World-space centre.
    pub position: Vec3,
    /// Stable per-instance seed.
    pub seed: u64,
    /// Silhouette derived from `seed`.
    pub shape: CloudShape,
}

/// Fixed pool of clouds around the camera.
#[derive(Debug, Clone)]
pub struct CloudPool {
    clouds: Pool<Cloud>,
    rule: RecycleRule,
    rng: ChaCha8Rng,
    recycled: u64,
    instances: InstanceBuffer,
}

impl CloudPool {
    /// Scatters `count` clouds around `frame` using `seed`.
    pub fn new(
        count: usize,
        seed: u64,
        rule: RecycleRule,
        frame: &CameraFrame,
    ) -> Result<Self, EnvironmentError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let clouds = Pool::new("cloud", count, |_| {
            let seed = rng.random::<u64>();
            Cloud {
                position: rule.scatter(frame, &mut rng),
                seed,
                shape: CloudShape::from_seed(seed),
            }
        })?;
        debug!("Cloud pool ready: {} clusters", clouds.len());

        Ok(Self {
            instances: InstanceBuffer::with_capacity(clouds.len() * MAX_PUFFS),
            clouds,
            rule,
            rng,
            recycled: 0,
        })
    }

    /// Moves every cloud that fell behind the camera to the spawn envelope
    /// ahead. Returns how many were moved.
    pub fn update(&mut self, frame: &CameraFrame) -> usize {
        let mut moved = 0;
        for cloud in &mut self.clouds {
            if self.rule.should_recycle(cloud.position, frame) {
                cloud.position = self.rule.respawn(frame, &mut self.rng);
                moved += 1;
            }
        }
        if moved > 0 {
            trace!("Recycled {moved} clouds");
        }
        self.recycled += moved as u64;
        moved
    }

    /// Rewrites the instance buffer, one record per puff.
    pub fn refresh_instances(&mut self, tint: [f32; 4]) {
        let records = self.clouds.iter().flat_map(|cloud| {
            let scale = cloud.shape.scale;
            cloud.shape.puffs().iter().map(move |puff| {
                InstanceRaw::new(
                    cloud.position + puff.offset * scale,
                    puff.radius * scale,
                    tint,
                )
            })
        });
        self.instances.refresh(records);
    }

    /// The clouds.
    #[must_use]
    pub fn clouds(&self) -> &Pool<Cloud> {
        &self.clouds
    }

    /// The recycle rule in use.
    #[must_use]
    pub fn rule(&self) -> &RecycleRule {
        &self.rule
    }

    /// Total recycles since creation.
    #[must_use]
    pub fn recycled(&self) -> u64 {
        self.recycled
    }

    /// Instance records written by the last refresh.
    #[must_use]
    pub fn instances(&self) -> &[InstanceRaw] {
        self.instances.records()
    }

    /// The same records as raw bytes for upload.
    #[must_use]
    pub fn instance_bytes(&self) -> &[u8] {
        self.instances.bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(z: f32) -> CameraFrame {
        CameraFrame::new(Vec3::new(0.0, 0.0, z), Vec3::Z)
    }

    #[test]
    fn test_shape_is_seed_stable() {
        assert_eq!(CloudShape::from_seed(99), CloudShape::from_seed(99));
        let shape = CloudShape::from_seed(5);
        assert!((3..=MAX_PUFFS).contains(&shape.puffs().len()));
        assert!(shape.puffs().iter().all(|p| p.radius >= 1.0));
    }

    #[test]
    fn test_zero_clouds_rejected() {
        let err = CloudPool::new(0, 1, CLOUD_RULE, &frame_at(0.0)).unwrap_err();
        assert_eq!(err, EnvironmentError::EmptyPool { pool: "cloud" });
    }

    #[test]
    fn test_recycle_keeps_shape_and_count() {
        let mut pool = CloudPool::new(12, 4, CLOUD_RULE, &frame_at(0.0)).unwrap();
        let shapes: Vec<CloudShape> = pool.clouds().iter().map(|c| c.shape).collect();
        for step in 0..1000 {
            pool.update(&frame_at(step as f32 * 2.0));
        }
        assert!(pool.recycled() > 12);
        assert_eq!(pool.clouds().len(), 12);
        let after: Vec<CloudShape> = pool.clouds().iter().map(|c| c.shape).collect();
        assert_eq!(shapes, after);
    }

    #[test]
    fn test_instances_one_per_puff() {
        let mut pool = CloudPool::new(3, 8, CLOUD_RULE, &frame_at(0.0)).unwrap();
        pool.refresh_instances([1.0, 1.0, 1.0, CLOUD_OPACITY]);
        let puffs: usize = pool.clouds().iter().map(|c| c.shape.puffs().len()).sum();
        assert_eq!(pool.instances().len(), puffs);
        assert_eq!(pool.instance_bytes().len(), puffs * 32);
    }
}
