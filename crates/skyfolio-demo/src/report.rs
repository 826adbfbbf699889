//! Summary of a finished run, printable as JSON.

use glam::Vec3;
use serde::Serialize;
use skyfolio_animation::SceneAnimator;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub frames: u64,
    pub elapsed: f32,
    pub section: String,
    pub mode: String,
    pub weather: String,
    pub has_started: bool,
    pub camera_position: [f32; 3],
    pub camera_look_at: [f32; 3],
    pub plane_position: [f32; 3],
    pub propeller_angle: f32,
    pub clouds_recycled: u64,
    pub chunks_recycled: u64,
    pub visible_particles: usize,
    pub instance_bytes: usize,
}

impl RunReport {
    pub fn capture(animator: &SceneAnimator) -> Self {
        let session = animator.session();
        let camera = animator.camera();
        let env = animator.environment();
        let plane = animator.rig().world_matrix().transform_point3(Vec3::ZERO);
        Self {
            frames: animator.clock().frame_count(),
            elapsed: animator.clock().elapsed(),
            section: session.section().to_string(),
            mode: format!("{:?}", session.mode()),
            weather: session.weather().to_string(),
            has_started: session.has_started(),
            camera_position: camera.position.to_array(),
            camera_look_at: camera.look_at.to_array(),
            plane_position: plane.to_array(),
            propeller_angle: animator.idle().propeller_angle(),
            clouds_recycled: env.clouds().recycled(),
            chunks_recycled: env.chunks().recycled(),
            visible_particles: env.precipitation().instances().len(),
            instance_bytes: env.clouds().instance_bytes().len()
                + env.chunks().instance_bytes().len()
                + env.precipitation().instance_bytes().len(),
        }
    }
}
