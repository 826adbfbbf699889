//! Per-instance records handed to the renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One instanced draw record: world position, uniform scale and RGBA tint.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub position: [f32; 3],
    pub scale: f32,
    pub tint: [f32; 4],
}

static_assertions::assert_eq_size!(InstanceRaw, [u8; 32]);

impl InstanceRaw {
    #[must_use]
    pub fn new(position: Vec3, scale: f32, tint: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            scale,
            tint,
        }
    }
}

/// Instance buffer sized once for a pool and overwritten in place.
#[derive(Debug, Clone)]
pub(crate) struct InstanceBuffer {
    records: Vec<InstanceRaw>,
    live: usize,
}

impl InstanceBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: vec![InstanceRaw::zeroed(); capacity],
            live: 0,
        }
    }

    /// Overwrites the records from `source`, stopping at the buffer capacity.
    pub(crate) fn refresh(&mut self, source: impl Iterator<Item = InstanceRaw>) {
        let mut live = 0;
        for (slot, record) in self.records.iter_mut().zip(source) {
            *slot = record;
            live += 1;
        }
        self.live = live;
    }

    pub(crate) fn records(&self) -> &[InstanceRaw] {
        &self.records[..self.live]
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.records())
    }
}
