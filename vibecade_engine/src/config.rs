//! Tunables for the hub. Every field has a default, so a JSON file only needs
//! to name the values it overrides.

use std::{
    f32::consts::PI,
    fs,
    path::{Path, PathBuf},
};

use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bounds::BoundaryVolume;
use crate::catalog::{default_cabinets, CabinetSpec};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{field} must be finite and positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("bounds must satisfy min < max on both axes (got {0:?})")]
    DegenerateBounds(BoundaryVolume),
    #[error("camera distance {distance} lies outside [{min}, {max}]")]
    CameraDistance { distance: f32, min: f32, max: f32 },
    #[error("npc_speed_min {min} exceeds npc_speed_max {max}")]
    NpcSpeedRange { min: f32, max: f32 },
    #[error("npc_speed_max {speed} must stay below twice arrival_epsilon {epsilon}")]
    NpcOvershoot { speed: f32, epsilon: f32 },
    #[error("cabinet #{index} ({name:?}) has an empty locator")]
    EmptyLocator { index: usize, name: String },
    #[error("npc spawn #{index} at ({x}, {z}) lies outside the bounds")]
    SpawnOutOfBounds { index: usize, x: f32, z: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub player_start: [f32; 3],
    pub player_speed: f32,
    pub look_sensitivity: f32,
    pub initial_yaw: f32,
    pub camera_height: f32,
    pub camera_distance: f32,
    pub min_camera_distance: f32,
    pub max_camera_distance: f32,
    pub zoom_step: f32,
    pub activation_radius: f32,
    pub arrival_epsilon: f32,
    pub bounds: BoundaryVolume,
    pub npc_speed_min: f32,
    pub npc_speed_max: f32,
    /// Width of the square around each spawn from which the first target is drawn.
    pub npc_initial_spread: f32,
    /// Radians per second for the neon pulse.
    pub light_rate: f32,
    pub light_ring_radius: f32,
    pub light_height: f32,
    pub rng_seed: Option<u64>,
    pub cabinets: Vec<CabinetSpec>,
    /// Floor-plane `[x, z]` spawn points, one NPC each.
    pub npc_spawns: Vec<[f32; 2]>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            player_start: [0.0, 0.0, 0.0],
            player_speed: 0.3,
            look_sensitivity: 0.002,
            initial_yaw: PI,
            camera_height: 5.0,
            camera_distance: 10.0,
            min_camera_distance: 5.0,
            max_camera_distance: 20.0,
            zoom_step: 0.5,
            activation_radius: 3.0,
            arrival_epsilon: 0.1,
            bounds: BoundaryVolume::default(),
            npc_speed_min: 0.02,
            npc_speed_max: 0.05,
            npc_initial_spread: 10.0,
            light_rate: 1.0,
            light_ring_radius: 20.0,
            light_height: 3.0,
            rng_seed: None,
            cabinets: default_cabinets(),
            npc_spawns: vec![
                [-10.0, -10.0],
                [10.0, -15.0],
                [-15.0, 5.0],
                [15.0, 10.0],
                [0.0, -20.0],
            ],
        }
    }
}

impl HubConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: HubConfig =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("loaded hub config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("look_sensitivity", self.look_sensitivity),
            ("camera_height", self.camera_height),
            ("min_camera_distance", self.min_camera_distance),
            ("max_camera_distance", self.max_camera_distance),
            ("zoom_step", self.zoom_step),
            ("activation_radius", self.activation_radius),
            ("arrival_epsilon", self.arrival_epsilon),
            ("npc_speed_min", self.npc_speed_min),
            ("npc_speed_max", self.npc_speed_max),
            ("light_rate", self.light_rate),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        let finite = [
            ("initial_yaw", self.initial_yaw),
            ("npc_initial_spread", self.npc_initial_spread),
            ("light_ring_radius", self.light_ring_radius),
            ("light_height", self.light_height),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.npc_initial_spread < 0.0 {
            return Err(ConfigError::Negative {
                field: "npc_initial_spread",
                value: self.npc_initial_spread,
            });
        }
        if let Some(value) = self.player_start.into_iter().find(|value| !value.is_finite()) {
            return Err(ConfigError::NotFinite {
                field: "player_start",
                value,
            });
        }

        if !self.bounds.is_well_formed() {
            return Err(ConfigError::DegenerateBounds(self.bounds));
        }
        if self.min_camera_distance > self.max_camera_distance
            || !(self.min_camera_distance..=self.max_camera_distance)
                .contains(&self.camera_distance)
        {
            return Err(ConfigError::CameraDistance {
                distance: self.camera_distance,
                min: self.min_camera_distance,
                max: self.max_camera_distance,
            });
        }
        if self.npc_speed_min > self.npc_speed_max {
            return Err(ConfigError::NpcSpeedRange {
                min: self.npc_speed_min,
                max: self.npc_speed_max,
            });
        }
        // A step of 2ε or more can straddle the target and never land within ε of it.
        if self.npc_speed_max >= 2.0 * self.arrival_epsilon {
            return Err(ConfigError::NpcOvershoot {
                speed: self.npc_speed_max,
                epsilon: self.arrival_epsilon,
            });
        }
        for (index, cabinet) in self.cabinets.iter().enumerate() {
            if cabinet.locator.trim().is_empty() {
                return Err(ConfigError::EmptyLocator {
                    index,
                    name: cabinet.name.clone(),
                });
            }
        }
        for (index, [x, z]) in self.npc_spawns.iter().copied().enumerate() {
            if !self.bounds.contains(glam::Vec3::new(x, 0.0, z)) {
                return Err(ConfigError::SpawnOutOfBounds { index, x, z });
            }
        }
        Ok(())
    }

    /// Generator for every random draw in the hub; reproducible when
    /// `rng_seed` is set.
    pub fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                log::debug!("no rng seed configured; using {seed}");
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        HubConfig::default().validate().expect("defaults are valid");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "player_speed": 0.5, "rng_seed": 42 }}"#).expect("write config");

        let config = HubConfig::from_json_file(file.path()).expect("config parses");
        assert_eq!(config.player_speed, 0.5);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.max_camera_distance, 20.0);
        assert_eq!(config.cabinets.len(), 7);
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write config");
        let err = HubConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("parsing config"));
    }

    #[test]
    fn rejects_inverted_camera_range() {
        let config = HubConfig {
            min_camera_distance: 25.0,
            ..HubConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CameraDistance { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_speed() {
        let config = HubConfig {
            player_speed: 0.0,
            ..HubConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "player_speed",
                ..
            })
        ));
    }

    #[test]
    fn rejects_npc_speed_that_overshoots_arrival() {
        let config = HubConfig {
            npc_speed_min: 0.25,
            npc_speed_max: 0.25,
            ..HubConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NpcOvershoot { .. })
        ));

        let config = HubConfig {
            npc_speed_max: 0.19,
            ..HubConfig::default()
        };
        config.validate().expect("just under twice epsilon");
    }

    #[test]
    fn rejects_spawn_outside_room() {
        let config = HubConfig {
            npc_spawns: vec![[0.0, 0.0], [30.0, 0.0]],
            ..HubConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnOutOfBounds { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_blank_locator() {
        let mut config = HubConfig::default();
        config.cabinets[3].locator = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyLocator { index: 3, .. })
        ));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = HubConfig {
            rng_seed: Some(11),
            ..HubConfig::default()
        };
        let mut first = config.seeded_rng();
        let mut second = config.seeded_rng();
        assert_eq!(first.next_u64(), second.next_u64());
    }
}
