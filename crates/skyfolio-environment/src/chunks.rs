//! Ground chunks: patches of trees or city blocks pinned to a fixed elevation.
//!
//! Each chunk carries both layouts. The active weather picks which one is
//! exported, so a weather switch never reshuffles the ground.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skyfolio_weather::GroundStyle;
use tracing::{debug, trace};

use crate::error::EnvironmentError;
use crate::instance::{InstanceBuffer, InstanceRaw};
use crate::pool::Pool;
use crate::recycle::{CameraFrame, RecycleRule, SpawnEnvelope};

/// Elevation of the ground plane.
pub const GROUND_ELEVATION: f32 = -20.0;

/// Trees per nature chunk.
pub const TREES_PER_CHUNK: usize = 5;

/// Towers per city chunk.
pub const TOWERS_PER_CHUNK: usize = 4;

/// Half-width of a chunk footprint.
const CHUNK_HALF_SIZE: f32 = 12.0;

/// Recycle rule for ground chunks.
pub const CHUNK_RULE: RecycleRule = RecycleRule {
    behind_dot: -0.2,
    distance: 60.0,
    spawn: SpawnEnvelope {
        base_distance: 90.0,
        jitter: 40.0,
        lateral: 60.0,
        vertical_min: 0.0,
        vertical_max: 0.0,
        ground: Some(GROUND_ELEVATION),
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    /// Footprint offset from the chunk centre.
    pub offset: Vec2,
    pub trunk_height: f32,
    /// Stacked foliage cones.
    pub tiers: u8,
    pub foliage_scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tower {
    pub offset: Vec2,
    pub width: f32,
    pub height: f32,
    /// Fraction of windows lit at night.
    pub lit_windows: f32,
}

/// Seed-derived arrangement of one chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkLayout {
    pub trees: [Tree; TREES_PER_CHUNK],
    pub towers: [Tower; TOWERS_PER_CHUNK],
}

impl ChunkLayout {
    /// Derives a layout from `seed`; equal seeds give equal layouts.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let trees = std::array::from_fn(|_| Tree {
            offset: footprint(&mut rng),
            trunk_height: 1.0 + rng.random::<f32>() * 1.5,
            tiers: rng.random_range(2..=4),
            foliage_scale: 1.5 + rng.random::<f32>() * 2.0,
        });
        let towers = std::array::from_fn(|_| Tower {
            offset: footprint(&mut rng),
            width: 2.0 + rng.random::<f32>() * 2.5,
            height: 4.0 + rng.random::<f32>() * 18.0,
            lit_windows: rng.random::<f32>(),
        });
        Self { trees, towers }
    }
}

fn footprint(rng: &mut ChaCha8Rng) -> Vec2 {
    let mut spread = || (rng.random::<f32>() * 2.0 - 1.0) * CHUNK_HALF_SIZE;
    Vec2::new(spread(), spread())
}

/// A pooled ground chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundChunk {
    /// World-space centre, always at [`GROUND_ELEVATION`].
    pub position: Vec3,
    pub seed: u64,
    pub layout: ChunkLayout,
}

/// Fixed pool of ground chunks around the camera.
#[derive(Debug, Clone)]
pub struct ChunkPool {
    chunks: Pool<GroundChunk>,
    rule: RecycleRule,
    rng: ChaCha8Rng,
    recycled: u64,
    instances: InstanceBuffer,
}

impl ChunkPool {
    /// Scatters `count` chunks on the ground around `frame` using `seed`.
    pub fn new(
        count: usize,
        seed: u64,
        rule: RecycleRule,
        frame: &CameraFrame,
    ) -> Result<Self, EnvironmentError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let chunks = Pool::new("ground chunk", count, |_| {
            let seed = rng.random::<u64>();
            GroundChunk {
                position: rule.scatter(frame, &mut rng),
                seed,
                layout: ChunkLayout::from_seed(seed),
            }
        })?;
        debug!("Ground pool ready: {} chunks", chunks.len());

        let per_chunk = TREES_PER_CHUNK.max(TOWERS_PER_CHUNK);
        Ok(Self {
            instances: InstanceBuffer::with_capacity(chunks.len() * per_chunk),
            chunks,
            rule,
            rng,
            recycled: 0,
        })
    }

    /// Moves chunks left behind the camera ahead of it. Returns how many moved.
    pub fn update(&mut self, frame: &CameraFrame) -> usize {
        let mut moved = 0;
        for chunk in &mut self.chunks {
            if self.rule.should_recycle(chunk.position, frame) {
                chunk.position = self.rule.respawn(frame, &mut self.rng);
                moved += 1;
            }
        }
        if moved > 0 {
            trace!("Recycled {moved} ground chunks");
        }
        self.recycled += moved as u64;
        moved
    }

    /// Rewrites the instance buffer with trees or towers, per `style`.
    ///
    /// Tree records sit at the foliage centre and scale by foliage size; tower
    /// records sit at the base and scale by height.
    pub fn refresh_instances(&mut self, style: GroundStyle, tint: [f32; 4]) {
        let chunks = self.chunks.as_slice();
        match style {
            GroundStyle::Nature => {
                self.instances.refresh(chunks.iter().flat_map(|chunk| {
                    chunk.layout.trees.iter().map(move |tree| {
                        let base = chunk.position + Vec3::new(tree.offset.x, 0.0, tree.offset.y);
                        InstanceRaw::new(
                            base + Vec3::Y * tree.trunk_height,
                            tree.foliage_scale,
                            tint,
                        )
                    })
                }));
            }
            GroundStyle::City => {
                self.instances.refresh(chunks.iter().flat_map(|chunk| {
                    chunk.layout.towers.iter().map(move |tower| {
                        InstanceRaw::new(
                            chunk.position + Vec3::new(tower.offset.x, 0.0, tower.offset.y),
                            tower.height,
                            tint,
                        )
                    })
                }));
            }
        }
    }

    /// The chunks.
    #[must_use]
    pub fn chunks(&self) -> &Pool<GroundChunk> {
        &self.chunks
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
        CameraFrame::new(Vec3::new(0.0, 5.0, z), Vec3::Z)
    }

    #[test]
    fn test_layout_is_seed_stable() {
        assert_eq!(ChunkLayout::from_seed(17), ChunkLayout::from_seed(17));
        assert_ne!(ChunkLayout::from_seed(17), ChunkLayout::from_seed(18));
    }

    #[test]
    fn test_chunks_stay_on_ground() {
        let mut pool = ChunkPool::new(10, 2, CHUNK_RULE, &frame_at(0.0)).unwrap();
        for step in 0..600 {
            pool.update(&frame_at(step as f32 * 1.5));
            assert!(pool.chunks().iter().all(|c| c.position.y == GROUND_ELEVATION));
        }
        assert!(pool.recycled() > 0);
        assert_eq!(pool.chunks().len(), 10);
    }

    #[test]
    fn test_style_switch_keeps_positions() {
        let mut pool = ChunkPool::new(4, 9, CHUNK_RULE, &frame_at(0.0)).unwrap();
        let before: Vec<Vec3> = pool.chunks().iter().map(|c| c.position).collect();

        pool.refresh_instances(GroundStyle::Nature, [1.0; 4]);
        assert_eq!(pool.instances().len(), 4 * TREES_PER_CHUNK);
        pool.refresh_instances(GroundStyle::City, [1.0; 4]);
        assert_eq!(pool.instances().len(), 4 * TOWERS_PER_CHUNK);
        assert!(pool.instances().iter().all(|i| i.position[1] == GROUND_ELEVATION));

        let after: Vec<Vec3> = pool.chunks().iter().map(|c| c.position).collect();
        assert_eq!(before, after);
    }
}
