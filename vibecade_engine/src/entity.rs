//! Positioned, yaw-oriented objects shared by the player, the NPCs and the
//! portal anchors. Rotation is restricted to the vertical (Y) axis, matching
//! the hub's Y-up, right-handed world basis.

use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialEntity {
    pub position: Vec3,
    /// Heading in radians about +Y.
    pub rotation_y: f32,
    pub visible: bool,
}

impl SpatialEntity {
    pub fn new(position: Vec3, rotation_y: f32) -> Self {
        Self {
            position,
            rotation_y,
            visible: true,
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation_y)
    }

    /// Move along the entity's local axes: the offset is expressed in local
    /// space and rotated by the current heading before being applied.
    pub fn translate_local(&mut self, local: Vec3) {
        self.position += self.orientation() * local;
    }

    /// Local -Z expressed in world space.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation_y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() <= EPSILON, "{a:?} != {b:?}");
    }

    #[test]
    fn unrotated_forward_is_negative_z() {
        let mut entity = SpatialEntity::new(Vec3::ZERO, 0.0);
        entity.translate_local(Vec3::new(0.0, 0.0, -1.0));
        approx_eq(entity.position, Vec3::new(0.0, 0.0, -1.0));
        approx_eq(entity.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn half_turn_flips_local_axes() {
        let mut entity = SpatialEntity::new(Vec3::ZERO, PI);
        entity.translate_local(Vec3::new(0.0, 0.0, -0.3));
        approx_eq(entity.position, Vec3::new(0.0, 0.0, 0.3));
        entity.translate_local(Vec3::new(0.3, 0.0, 0.0));
        approx_eq(entity.position, Vec3::new(-0.3, 0.0, 0.3));
    }

    #[test]
    fn quarter_turn_maps_forward_onto_negative_x() {
        let entity = SpatialEntity::new(Vec3::ZERO, FRAC_PI_2);
        approx_eq(entity.forward(), Vec3::NEG_X);
    }
}
