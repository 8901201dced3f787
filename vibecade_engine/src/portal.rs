//! Arcade cabinets that open an external page when the player stands close
//! and presses the activation key.

use glam::Vec3;
use serde::Serialize;

use crate::catalog::CabinetSpec;
use crate::entity::SpatialEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PortalId(pub usize);

#[derive(Debug, Clone)]
pub struct Portal {
    pub id: PortalId,
    pub anchor: SpatialEntity,
    pub cabinet: CabinetSpec,
}

impl Portal {
    pub fn locator(&self) -> &str {
        &self.cabinet.locator
    }

    pub fn name(&self) -> &str {
        &self.cabinet.name
    }
}

/// Portals in registration order. Lookups scan front to back, so when
/// activation zones overlap the earliest registration wins.
#[derive(Debug, Clone)]
pub struct PortalRegistry {
    portals: Vec<Portal>,
    activation_radius: f32,
}

impl PortalRegistry {
    pub fn new(activation_radius: f32) -> Self {
        Self {
            portals: Vec::new(),
            activation_radius,
        }
    }

    pub fn register(&mut self, cabinet: CabinetSpec, position: Vec3, rotation_y: f32) -> PortalId {
        let id = PortalId(self.portals.len());
        self.portals.push(Portal {
            id,
            anchor: SpatialEntity::new(position, rotation_y),
            cabinet,
        });
        id
    }

    pub fn activation_radius(&self) -> f32 {
        self.activation_radius
    }

    pub fn get(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(id.0)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Portal> {
        self.portals.iter()
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    /// First portal strictly within the activation radius of
    /// `player_position`, considered only on the tick the key went down.
    pub fn find_activatable(
        &self,
        player_position: Vec3,
        activation_pressed: bool,
    ) -> Option<&Portal> {
        if !activation_pressed {
            return None;
        }
        self.portals
            .iter()
            .find(|portal| portal.anchor.distance_to(player_position) < self.activation_radius)
    }

    /// Earliest-registered portal whose zone contains the player, regardless
    /// of input. Not necessarily the closest one.
    pub fn first_in_range(&self, player_position: Vec3) -> Option<&Portal> {
        self.find_activatable(player_position, true)
    }
}

/// Rising-edge detector for the activation key: a held key fires once and
/// must be released before it can fire again.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivationTrigger {
    was_held: bool,
}

impl ActivationTrigger {
    pub fn rising_edge(&mut self, held: bool) -> bool {
        let edge = held && !self.was_held;
        self.was_held = held;
        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cabinet(name: &str) -> CabinetSpec {
        CabinetSpec {
            name: name.to_string(),
            locator: format!("https://example.invalid/{name}"),
            cabinet_color: [1.0, 0.0, 0.0],
            frame_color: [0.0, 1.0, 0.0],
        }
    }

    fn registry() -> PortalRegistry {
        let mut registry = PortalRegistry::new(3.0);
        registry.register(cabinet("first"), Vec3::new(0.0, 0.0, 0.0), 0.0);
        registry.register(cabinet("second"), Vec3::new(1.0, 0.0, 0.0), 0.0);
        registry.register(cabinet("far"), Vec3::new(20.0, 0.0, 0.0), 0.0);
        registry
    }

    #[test]
    fn overlapping_zones_pick_registration_order() {
        let registry = registry();
        let hit = registry
            .find_activatable(Vec3::new(0.9, 0.0, 0.0), true)
            .expect("portal in range");
        assert_eq!(hit.name(), "first");
        assert_eq!(hit.id, PortalId(0));
    }

    #[test]
    fn first_in_range_ignores_distance_ordering() {
        let registry = registry();
        let hit = registry
            .first_in_range(Vec3::new(1.0, 0.0, 0.0))
            .expect("portal in range");
        assert_eq!(hit.name(), "first");
    }

    #[test]
    fn radius_boundary() {
        let registry = registry();
        let inside = registry.find_activatable(Vec3::new(22.9, 0.0, 0.0), true);
        assert_eq!(inside.map(Portal::name), Some("far"));
        assert!(registry.find_activatable(Vec3::new(23.1, 0.0, 0.0), true).is_none());
    }

    #[test]
    fn no_key_no_match() {
        let registry = registry();
        assert!(registry.find_activatable(Vec3::ZERO, false).is_none());
        assert!(registry.first_in_range(Vec3::ZERO).is_some());
    }

    #[test]
    fn trigger_fires_once_per_press() {
        let mut trigger = ActivationTrigger::default();
        let fired: Vec<bool> = [true, true, true, false, true, false]
            .into_iter()
            .map(|held| trigger.rising_edge(held))
            .collect();
        assert_eq!(fired, vec![true, false, false, false, true, false]);
    }
}
