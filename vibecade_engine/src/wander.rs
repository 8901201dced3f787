//! Random-waypoint wandering for the ambient NPCs. Each agent walks straight
//! toward its target at a fixed per-tick speed and picks a fresh target on
//! arrival or when the next step would carry it out of the room.

use glam::Vec3;
use rand::RngCore;
use serde::Serialize;

use crate::bounds::BoundaryVolume;
use crate::entity::SpatialEntity;

/// Outcome of a single agent update, surfaced in tick reports and traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WanderStep {
    Moved,
    /// Within the arrival radius; a new target was drawn and the agent stayed put.
    Arrived,
    /// The step would have left the bounds; a new target was drawn instead.
    Blocked,
}

#[derive(Debug, Clone)]
pub struct WanderAgent {
    entity: SpatialEntity,
    target: Vec3,
    speed: f32,
}

impl WanderAgent {
    /// The target is clamped into `bounds` so the agent never chases a point
    /// outside the room.
    pub fn new(entity: SpatialEntity, target: Vec3, speed: f32, bounds: &BoundaryVolume) -> Self {
        Self {
            entity,
            target: bounds.clamp(target),
            speed,
        }
    }

    pub fn entity(&self) -> &SpatialEntity {
        &self.entity
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn update(
        &mut self,
        bounds: &BoundaryVolume,
        arrival_epsilon: f32,
        rng: &mut dyn RngCore,
    ) -> WanderStep {
        let direction = self.target - self.entity.position;
        let distance = direction.length();
        if distance < arrival_epsilon {
            self.target = bounds.sample(rng);
            log::trace!("npc arrived; next target {:?}", self.target);
            return WanderStep::Arrived;
        }

        // distance >= arrival_epsilon > 0 here, so the division is safe.
        let heading = direction / distance;
        let next_position = self.entity.position + heading * self.speed;
        if bounds.contains(next_position) {
            self.entity.position = next_position;
            self.entity.rotation_y = heading.x.atan2(heading.z);
            WanderStep::Moved
        } else {
            self.target = bounds.sample(rng);
            log::trace!("npc blocked at {:?}; retargeting", self.entity.position);
            WanderStep::Blocked
        }
    }
}
