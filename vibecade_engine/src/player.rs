use glam::Vec3;

use crate::entity::SpatialEntity;
use crate::input::{InputSnapshot, KEY_BACK, KEY_FORWARD, KEY_LEFT, KEY_RIGHT};

/// The avatar plus the per-player view settings. Movement is deliberately not
/// bounded: only NPCs are constrained to the room.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub entity: SpatialEntity,
    pub camera_distance: f32,
    pub overlay_active: bool,
}

impl PlayerState {
    pub fn new(position: Vec3, yaw: f32, camera_distance: f32) -> Self {
        Self {
            entity: SpatialEntity::new(position, yaw),
            camera_distance,
            overlay_active: false,
        }
    }

    /// Freeze and hide the avatar while an overlay covers the scene.
    pub fn enter_overlay(&mut self) {
        self.overlay_active = true;
        self.entity.visible = false;
    }

    pub fn leave_overlay(&mut self) {
        self.overlay_active = false;
        self.entity.visible = true;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerController {
    /// Distance covered per held movement key per tick.
    pub step: f32,
    /// Radians of yaw per unit of horizontal mouse delta.
    pub look_sensitivity: f32,
}

impl PlayerController {
    pub fn new(step: f32, look_sensitivity: f32) -> Self {
        Self {
            step,
            look_sensitivity,
        }
    }

    /// Apply one tick of input. The mouse delta is drained even when the
    /// overlay swallows the input so it cannot replay after dismissal.
    pub fn apply(&self, player: &mut PlayerState, input: &mut InputSnapshot) {
        let (mouse_dx, _) = input.take_mouse_delta();
        if player.overlay_active {
            return;
        }

        let entity = &mut player.entity;
        entity.rotation_y -= mouse_dx * self.look_sensitivity;

        if input.is_held(KEY_FORWARD) {
            entity.translate_local(Vec3::new(0.0, 0.0, -self.step));
        }
        if input.is_held(KEY_BACK) {
            entity.translate_local(Vec3::new(0.0, 0.0, self.step));
        }
        if input.is_held(KEY_LEFT) {
            entity.translate_local(Vec3::new(-self.step, 0.0, 0.0));
        }
        if input.is_held(KEY_RIGHT) {
            entity.translate_local(Vec3::new(self.step, 0.0, 0.0));
        }
    }
}
