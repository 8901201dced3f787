use glam::Vec3;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle on the floor plane that NPCs may not leave. The
/// vertical axis is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryVolume {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for BoundaryVolume {
    fn default() -> Self {
        Self {
            min_x: -24.0,
            max_x: 24.0,
            min_z: -24.0,
            max_z: 24.0,
        }
    }
}

impl BoundaryVolume {
    pub fn is_well_formed(&self) -> bool {
        [self.min_x, self.max_x, self.min_z, self.max_z]
            .iter()
            .all(|value| value.is_finite())
            && self.min_x < self.max_x
            && self.min_z < self.max_z
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.z >= self.min_z
            && point.z <= self.max_z
    }

    pub fn clamp(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y,
            point.z.clamp(self.min_z, self.max_z),
        )
    }

    /// Uniform sample on the floor plane (`y = 0`).
    pub fn sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        Vec3::new(
            rng.random_range(self.min_x..=self.max_x),
            0.0,
            rng.random_range(self.min_z..=self.max_z),
        )
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) * 0.5,
            0.0,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }
}
