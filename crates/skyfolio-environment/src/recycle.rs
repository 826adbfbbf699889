//! Directional recycle rule shared by the cloud and ground-chunk pools.
//!
//! An element is moved only when it is both far from the camera and behind
//! its facing direction by a margin, so a respawn never happens on screen.

use glam::Vec3;
use rand::Rng;
use skyfolio_scene::CameraState;

/// Camera basis used for recycling decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Eye position.
    pub position: Vec3,
    /// Unit viewing direction.
    pub forward: Vec3,
    /// Unit horizontal axis to the right of `forward`.
    pub right: Vec3,
}

impl CameraFrame {
    /// Builds a frame at `position` facing `forward`. A degenerate direction
    /// falls back to `-Z`.
    #[must_use]
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        let forward = forward.try_normalize().unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        Self {
            position,
            forward,
            right,
        }
    }

    /// Frame of the current camera.
    #[must_use]
    pub fn from_camera(camera: &CameraState) -> Self {
        Self::new(camera.position, camera.forward())
    }

    /// The same frame with `forward` flattened onto the ground plane.
    ///
    /// `right` is already horizontal, so `Y × right` is the horizontal part of
    /// `forward`; a camera looking straight up or down falls back to `-Z`.
    #[must_use]
    pub fn level(&self) -> Self {
        Self {
            position: self.position,
            forward: Vec3::Y.cross(self.right).try_normalize().unwrap_or(Vec3::NEG_Z),
            right: self.right,
        }
    }
}

/// Where recycled elements reappear, relative to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEnvelope {
    /// Minimum distance ahead along `forward`.
    pub base_distance: f32,
    /// Extra random distance ahead, `[0, jitter)`.
    pub jitter: f32,
    /// Half-width of the random sideways offset.
    pub lateral: f32,
    /// Lowest vertical offset from the camera.
    pub vertical_min: f32,
    /// Highest vertical offset from the camera.
    pub vertical_max: f32,
    /// Absolute elevation that overrides the vertical offset, for ground pieces.
    pub ground: Option<f32>,
}

/// Recycle predicate plus respawn envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecycleRule {
    /// Elements whose direction from the camera has a dot product with
    /// `forward` below this value count as behind.
    pub behind_dot: f32,
    /// Elements closer than this are never recycled.
    pub distance: f32,
    /// Respawn placement.
    pub spawn: SpawnEnvelope,
}

impl RecycleRule {
    /// Whether the element at `position` should be moved ahead.
    ///
    /// Ground pieces are judged in the horizontal plane, so altitude alone
    /// never puts them behind the camera. A non-finite position is always
    /// recycled.
    #[must_use]
    pub fn should_recycle(&self, position: Vec3, frame: &CameraFrame) -> bool {
        if !position.is_finite() {
            return true;
        }
        let frame = self.oriented(frame);
        let mut offset = position - frame.position;
        if self.spawn.ground.is_some() {
            offset.y = 0.0;
        }
        let distance = offset.length();
        if distance.is_nan() || distance <= self.distance {
            return false;
        }
        let dot = offset
            .try_normalize()
            .map_or(0.0, |dir| dir.dot(frame.forward));
        dot < self.behind_dot
    }

    /// A fresh position inside the spawn envelope ahead of the camera.
    pub fn respawn<R: Rng>(&self, frame: &CameraFrame, rng: &mut R) -> Vec3 {
        let ahead = self.spawn.base_distance + rng.random::<f32>() * self.spawn.jitter;
        self.place(frame, ahead, rng)
    }

    /// Initial placement: anywhere from just behind the camera to the far
    /// edge of the spawn envelope, so the first frames are already populated.
    pub fn scatter<R: Rng>(&self, frame: &CameraFrame, rng: &mut R) -> Vec3 {
        let near = -0.5 * self.distance;
        let far = self.spawn.base_distance + self.spawn.jitter;
        let ahead = near + rng.random::<f32>() * (far - near);
        self.place(frame, ahead, rng)
    }

    /// Ground rules work from the levelled frame.
    fn oriented(&self, frame: &CameraFrame) -> CameraFrame {
        if self.spawn.ground.is_some() {
            frame.level()
        } else {
            *frame
        }
    }

    fn place<R: Rng>(&self, frame: &CameraFrame, ahead: f32, rng: &mut R) -> Vec3 {
        let frame = self.oriented(frame);
        let spawn = &self.spawn;
        let lateral = (rng.random::<f32>() * 2.0 - 1.0) * spawn.lateral;
        let vertical =
            spawn.vertical_min + rng.random::<f32>() * (spawn.vertical_max - spawn.vertical_min);
        let mut position = frame.position
            + frame.forward * ahead
            + frame.right * lateral
            + Vec3::Y * vertical;
        if let Some(ground) = spawn.ground {
            position.y = ground;
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rule(ground: Option<f32>) -> RecycleRule {
        RecycleRule {
            behind_dot: -0.2,
            distance: 50.0,
            spawn: SpawnEnvelope {
                base_distance: 100.0,
                jitter: 40.0,
                lateral: 30.0,
                vertical_min: -5.0,
                vertical_max: 10.0,
                ground,
            },
        }
    }

    fn frame() -> CameraFrame {
        CameraFrame::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Z)
    }

    #[test]
    fn test_predicate_needs_distance_and_behind() {
        let rule = rule(None);
        let frame = frame();
        // Far behind.
        assert!(rule.should_recycle(Vec3::new(0.0, 2.0, -80.0), &frame));
        // Behind but close.
        assert!(!rule.should_recycle(Vec3::new(0.0, 2.0, -30.0), &frame));
        // Far ahead.
        assert!(!rule.should_recycle(Vec3::new(0.0, 2.0, 80.0), &frame));
        // Far to the side, barely behind: inside the margin.
        assert!(!rule.should_recycle(Vec3::new(80.0, 2.0, -5.0), &frame));
    }

    #[test]
    fn test_non_finite_position_is_recycled() {
        let rule = rule(None);
        let frame = frame();
        assert!(rule.should_recycle(Vec3::NAN, &frame));
        assert!(rule.should_recycle(Vec3::new(0.0, f32::INFINITY, 0.0), &frame));

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let fresh = rule.respawn(&frame, &mut rng);
        assert!(fresh.is_finite());
        assert!(!rule.should_recycle(fresh, &frame));
    }

    #[test]
    fn test_ground_respawn_ahead_of_climbing_camera() {
        let rule = rule(Some(-20.0));
        let climb = Vec3::new(0.0, 1.0, 1.0).normalize();
        let frame = CameraFrame::new(Vec3::new(0.0, 400.0, 0.0), climb);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let p = rule.respawn(&frame, &mut rng);
            assert_eq!(p.y, -20.0);
            assert!(p.z >= 100.0, "z {}", p.z);
            assert!(!rule.should_recycle(p, &frame));
        }
        // Straight below the camera is not behind it.
        assert!(!rule.should_recycle(Vec3::new(0.0, -20.0, 10.0), &frame));
    }

    #[test]
    fn test_level_frame_of_vertical_camera() {
        let frame = CameraFrame::new(Vec3::ZERO, Vec3::NEG_Y).level();
        assert_eq!(frame.forward.y, 0.0);
        assert!(frame.forward.is_normalized());
    }

    #[test]
    fn test_respawn_inside_envelope() {
        let rule = rule(None);
        let frame = frame();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let p = rule.respawn(&frame, &mut rng) - frame.position;
            let ahead = p.dot(frame.forward);
            assert!((100.0..=140.0).contains(&ahead), "ahead {ahead}");
            assert!(p.dot(frame.right).abs() <= 30.0);
            assert!((-5.0..=10.0).contains(&p.y));
            assert!(!rule.should_recycle(frame.position + p, &frame));
        }
    }

    #[test]
    fn test_ground_snaps_elevation() {
        let rule = rule(Some(-20.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(rule.respawn(&frame(), &mut rng).y, -20.0);
            assert_eq!(rule.scatter(&frame(), &mut rng).y, -20.0);
        }
    }

    #[test]
    fn test_degenerate_forward_falls_back() {
        let frame = CameraFrame::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(frame.forward, Vec3::NEG_Z);
        assert!(frame.right.is_normalized());
    }
}
