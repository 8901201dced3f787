//! The hub's world aggregate and its per-tick update. Everything the tick
//! touches is owned here and passed in explicitly; there is no ambient state.

use glam::Vec3;
use rand::{rngs::SmallRng, Rng};
use serde::Serialize;

use crate::bounds::BoundaryVolume;
use crate::camera::{CameraPose, CameraRig};
use crate::catalog::{furnish, wall_placement, SceneProp};
use crate::config::{ConfigError, HubConfig};
use crate::entity::SpatialEntity;
use crate::input::{InputSnapshot, KEY_ACTIVATE};
use crate::lights::{neon_ring, NeonLight};
use crate::overlay::OverlayGateway;
use crate::player::{PlayerController, PlayerState};
use crate::portal::{ActivationTrigger, PortalId, PortalRegistry};
use crate::wander::{WanderAgent, WanderStep};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activation {
    pub portal: PortalId,
    pub name: String,
    pub locator: String,
}

/// What happened during one tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub activated: Option<Activation>,
    pub dismissed: bool,
    pub wander: Vec<WanderStep>,
}

pub struct HubWorld {
    bounds: BoundaryVolume,
    portals: PortalRegistry,
    agents: Vec<WanderAgent>,
    player: PlayerState,
    controller: PlayerController,
    camera_rig: CameraRig,
    camera: CameraPose,
    lights: Vec<NeonLight>,
    light_rate: f32,
    arrival_epsilon: f32,
    props: Vec<SceneProp>,
    activation: ActivationTrigger,
    rng: SmallRng,
    tick: u64,
}

impl std::fmt::Debug for HubWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubWorld")
            .field("tick", &self.tick)
            .field("bounds", &self.bounds)
            .field("portals", &self.portals.len())
            .field("agents", &self.agents.len())
            .field("overlay_active", &self.player.overlay_active)
            .finish()
    }
}

impl HubWorld {
    pub fn new(config: &HubConfig) -> Result<Self, ConfigError> {
        let rng = config.seeded_rng();
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &HubConfig, mut rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.bounds;

        let mut portals = PortalRegistry::new(config.activation_radius);
        for (index, cabinet) in config.cabinets.iter().enumerate() {
            let (position, rotation_y) = wall_placement(index, &bounds);
            portals.register(cabinet.clone(), position, rotation_y);
        }

        let half_spread = config.npc_initial_spread * 0.5;
        let agents = config
            .npc_spawns
            .iter()
            .map(|&[x, z]| {
                let spawn = Vec3::new(x, 0.0, z);
                let target = spawn
                    + Vec3::new(
                        rng.random_range(-half_spread..=half_spread),
                        0.0,
                        rng.random_range(-half_spread..=half_spread),
                    );
                let speed = rng.random_range(config.npc_speed_min..=config.npc_speed_max);
                WanderAgent::new(SpatialEntity::new(spawn, 0.0), target, speed, &bounds)
            })
            .collect();

        let player = PlayerState::new(
            Vec3::from_array(config.player_start),
            config.initial_yaw,
            config.camera_distance,
        );
        let camera_rig = CameraRig {
            height: config.camera_height,
            min_distance: config.min_camera_distance,
            max_distance: config.max_camera_distance,
            zoom_step: config.zoom_step,
        };
        let camera = camera_rig.pose(&player);

        let mut lights = neon_ring(bounds.center(), config.light_ring_radius, config.light_height);
        for light in &mut lights {
            light.animate(0.0, config.light_rate);
        }

        log::info!(
            "hub ready: {} portals, {} npcs, bounds x[{}, {}] z[{}, {}]",
            portals.len(),
            config.npc_spawns.len(),
            bounds.min_x,
            bounds.max_x,
            bounds.min_z,
            bounds.max_z
        );

        Ok(Self {
            bounds,
            portals,
            agents,
            player,
            controller: PlayerController::new(config.player_speed, config.look_sensitivity),
            camera_rig,
            camera,
            lights,
            light_rate: config.light_rate,
            arrival_epsilon: config.arrival_epsilon,
            props: furnish(&bounds),
            activation: ActivationTrigger::default(),
            rng,
            tick: 0,
        })
    }

    /// One update: dismissal, player input, portal activation, camera,
    /// lights, then every NPC in spawn order.
    pub fn tick(
        &mut self,
        input: &mut InputSnapshot,
        elapsed_secs: f64,
        overlay: &mut dyn OverlayGateway,
    ) -> TickReport {
        let dismissed = overlay.take_dismissal() && self.dismiss_overlay(overlay);

        self.controller.apply(&mut self.player, input);

        let pressed = self.activation.rising_edge(input.is_held(KEY_ACTIVATE));
        let mut activated = None;
        if !self.player.overlay_active {
            if let Some(portal) = self
                .portals
                .find_activatable(self.player.entity.position, pressed)
            {
                log::info!("opening {} -> {}", portal.name(), portal.locator());
                overlay.show(portal.locator());
                self.player.enter_overlay();
                activated = Some(Activation {
                    portal: portal.id,
                    name: portal.name().to_string(),
                    locator: portal.locator().to_string(),
                });
            }
        }

        let zoom = input.take_zoom();
        self.camera_rig
            .zoom(&mut self.player, zoom, input.look_engaged());
        self.camera = self.camera_rig.pose(&self.player);

        for light in &mut self.lights {
            light.animate(elapsed_secs, self.light_rate);
        }

        let wander = self
            .agents
            .iter_mut()
            .map(|agent| agent.update(&self.bounds, self.arrival_epsilon, &mut self.rng))
            .collect();

        let report = TickReport {
            tick: self.tick,
            activated,
            dismissed,
            wander,
        };
        self.tick += 1;
        report
    }

    /// Close the overlay and hand control back to the player. Returns whether
    /// an overlay was actually open.
    pub fn dismiss_overlay(&mut self, overlay: &mut dyn OverlayGateway) -> bool {
        if !self.player.overlay_active {
            return false;
        }
        overlay.hide();
        self.player.leave_overlay();
        log::info!("overlay dismissed; avatar restored");
        true
    }

    pub fn bounds(&self) -> &BoundaryVolume {
        &self.bounds
    }

    pub fn portals(&self) -> &PortalRegistry {
        &self.portals
    }

    pub fn agents(&self) -> &[WanderAgent] {
        &self.agents
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera
    }

    pub fn lights(&self) -> &[NeonLight] {
        &self.lights
    }

    pub fn props(&self) -> &[SceneProp] {
        &self.props
    }

    pub fn overlay_active(&self) -> bool {
        self.player.overlay_active
    }

    /// Number of ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{OverlayEvent, RecordingOverlay};
    use rand::SeedableRng;

    fn seeded(config: &HubConfig) -> HubWorld {
        HubWorld::with_rng(config, SmallRng::seed_from_u64(5)).expect("valid config")
    }

    #[test]
    fn builds_from_defaults() {
        let world = seeded(&HubConfig::default());
        assert_eq!(world.portals().len(), 7);
        assert_eq!(world.agents().len(), 5);
        assert_eq!(world.lights().len(), 4);
        for agent in world.agents() {
            assert!(world.bounds().contains(agent.target()));
            assert!((0.02..=0.05).contains(&agent.speed()));
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = HubConfig {
            zoom_step: -1.0,
            ..HubConfig::default()
        };
        assert!(HubWorld::with_rng(&config, SmallRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn activation_then_dismissal_round_trip() {
        let config = HubConfig {
            player_start: [-15.0, 0.0, -22.0],
            ..HubConfig::default()
        };
        let mut world = seeded(&config);
        let mut overlay = RecordingOverlay::new();
        let mut input = InputSnapshot::new();

        input.press('f');
        let report = world.tick(&mut input, 0.0, &mut overlay);
        let activation = report.activated.expect("cabinet in range");
        assert_eq!(activation.name, "Hot Air Balloon");
        assert!(world.overlay_active());
        assert!(!world.player().entity.visible);

        input.release('f');
        overlay.request_dismissal();
        let report = world.tick(&mut input, 0.016, &mut overlay);
        assert!(report.dismissed);
        assert!(!world.overlay_active());
        assert!(world.player().entity.visible);
        assert_eq!(
            overlay.events(),
            &[
                OverlayEvent::Show("https://www.hotairvibe.com/game".into()),
                OverlayEvent::Hide,
            ]
        );
    }

    #[test]
    fn tick_counter_advances_and_reports_every_npc() {
        let mut world = seeded(&HubConfig::default());
        let mut overlay = RecordingOverlay::new();
        let mut input = InputSnapshot::new();
        for expected in 0..3 {
            let report = world.tick(&mut input, expected as f64 / 60.0, &mut overlay);
            assert_eq!(report.tick, expected);
            assert_eq!(report.wander.len(), 5);
        }
        assert_eq!(world.ticks(), 3);
    }

    #[test]
    fn camera_tracks_player_each_tick() {
        let mut world = seeded(&HubConfig::default());
        let mut overlay = RecordingOverlay::new();
        let mut input = InputSnapshot::new();
        input.press('w');
        world.tick(&mut input, 0.0, &mut overlay);
        let pose = world.camera_pose();
        assert_eq!(pose.target, world.player().entity.position);
        let planar = Vec3::new(pose.eye.x - pose.target.x, 0.0, pose.eye.z - pose.target.z);
        assert!((planar.length() - 10.0).abs() < 1e-4);
        assert!((pose.eye.y - 5.0).abs() < 1e-6);
    }
}
