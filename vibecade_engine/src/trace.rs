//! Per-tick samples of the hub, written out as JSON by headless runs.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::world::{Activation, HubWorld, TickReport};

#[derive(Debug, Clone, Serialize)]
pub struct TickSample {
    pub tick: u64,
    pub player_position: [f32; 3],
    pub player_yaw: f32,
    pub player_visible: bool,
    pub camera_distance: f32,
    pub npc_positions: Vec<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated: Option<Activation>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dismissed: bool,
}

impl TickSample {
    pub fn capture(world: &HubWorld, report: &TickReport) -> Self {
        let player = world.player();
        Self {
            tick: report.tick,
            player_position: player.entity.position.to_array(),
            player_yaw: player.entity.rotation_y,
            player_visible: player.entity.visible,
            camera_distance: player.camera_distance,
            npc_positions: world
                .agents()
                .iter()
                .map(|agent| agent.entity().position.to_array())
                .collect(),
            activated: report.activated.clone(),
            dismissed: report.dismissed,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HubTrace {
    pub seed: Option<u64>,
    pub step_secs: f64,
    pub samples: Vec<TickSample>,
}

impl HubTrace {
    pub fn new(seed: Option<u64>, step_secs: f64) -> Self {
        Self {
            seed,
            step_secs,
            samples: Vec::new(),
        }
    }

    pub fn record(&mut self, world: &HubWorld, report: &TickReport) {
        self.samples.push(TickSample::capture(world, report));
    }

    pub fn activations(&self) -> impl Iterator<Item = &Activation> {
        self.samples
            .iter()
            .filter_map(|sample| sample.activated.as_ref())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing hub trace to JSON")?;
        fs::write(path, json)
            .with_context(|| format!("writing hub trace to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::input::InputSnapshot;
    use crate::overlay::RecordingOverlay;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn trace_captures_player_and_npcs() {
        let mut world =
            HubWorld::with_rng(&HubConfig::default(), SmallRng::seed_from_u64(9)).expect("world");
        let mut overlay = RecordingOverlay::new();
        let mut input = InputSnapshot::new();
        let mut trace = HubTrace::new(Some(9), 1.0 / 60.0);

        input.press('w');
        for _ in 0..2 {
            let report = world.tick(&mut input, 0.0, &mut overlay);
            trace.record(&world, &report);
        }

        assert_eq!(trace.samples.len(), 2);
        let last = &trace.samples[1];
        assert_eq!(last.tick, 1);
        assert_eq!(last.npc_positions.len(), 5);
        assert!((last.player_position[2] - 0.6).abs() < 1e-4);
        assert!(trace.activations().next().is_none());
    }

    #[test]
    fn writes_pretty_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("trace.json");
        let trace = HubTrace::new(None, 0.5);
        trace.write_json(&path).expect("trace written");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read back")).expect("json");
        assert_eq!(value["step_secs"], 0.5);
        assert!(value["samples"].as_array().expect("samples").is_empty());
    }
}
