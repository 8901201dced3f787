//! Third-person follow camera. The rig owns no entity; each tick it derives
//! an eye position from the avatar's transform and the player's zoom level.

use glam::{Quat, Vec3};

use crate::player::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    /// Always the avatar's position, never its facing direction.
    pub target: Vec3,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub height: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub zoom_step: f32,
}

impl CameraRig {
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    /// Apply `notches` zoom events one step at a time, clamping after each so
    /// an overshoot in one direction cannot bank distance for the other.
    /// Zoom only responds while look mode is engaged.
    pub fn zoom(&self, player: &mut PlayerState, notches: i32, look_engaged: bool) {
        if !look_engaged || notches == 0 {
            return;
        }
        let step = if notches > 0 {
            self.zoom_step
        } else {
            -self.zoom_step
        };
        let mut distance = player.camera_distance;
        for _ in 0..notches.unsigned_abs() {
            let next = self.clamp_distance(distance + step);
            if next == distance {
                break;
            }
            distance = next;
        }
        player.camera_distance = distance;
    }

    pub fn pose(&self, player: &PlayerState) -> CameraPose {
        let avatar = &player.entity;
        let offset = Vec3::new(0.0, self.height, player.camera_distance);
        let rotated = Quat::from_rotation_y(avatar.rotation_y) * offset;
        CameraPose {
            eye: avatar.position + rotated,
            target: avatar.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn rig() -> CameraRig {
        CameraRig {
            height: 5.0,
            min_distance: 5.0,
            max_distance: 20.0,
            zoom_step: 0.5,
        }
    }

    #[test]
    fn unrotated_camera_sits_behind_and_above() {
        let player = PlayerState::new(Vec3::new(1.0, 0.0, 2.0), 0.0, 10.0);
        let pose = rig().pose(&player);
        assert!((pose.eye - Vec3::new(1.0, 5.0, 12.0)).length() < EPSILON);
        assert_eq!(pose.target, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn offset_follows_yaw() {
        let player = PlayerState::new(Vec3::ZERO, FRAC_PI_2, 10.0);
        let pose = rig().pose(&player);
        assert!((pose.eye - Vec3::new(10.0, 5.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn zoom_saturates_at_max() {
        let mut player = PlayerState::new(Vec3::ZERO, 0.0, 19.8);
        for _ in 0..100 {
            rig().zoom(&mut player, 1, true);
            assert!(player.camera_distance <= 20.0);
        }
        assert_eq!(player.camera_distance, 20.0);
    }

    #[test]
    fn zoom_saturates_at_min_in_one_batch() {
        let mut player = PlayerState::new(Vec3::ZERO, 0.0, 10.0);
        rig().zoom(&mut player, -1_000, true);
        assert_eq!(player.camera_distance, 5.0);
    }

    #[test]
    fn zoom_is_ignored_without_look_mode() {
        let mut player = PlayerState::new(Vec3::ZERO, 0.0, 10.0);
        rig().zoom(&mut player, 4, false);
        assert_eq!(player.camera_distance, 10.0);
    }

    #[test]
    fn alternating_zoom_stays_in_range() {
        let mut player = PlayerState::new(Vec3::ZERO, 0.0, 5.2);
        for notches in [-3, 7, -40, 2, 100, -1, 31, -9] {
            rig().zoom(&mut player, notches, true);
            assert!((5.0..=20.0).contains(&player.camera_distance));
        }
    }
}
