use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vibecade_engine::HubConfig;

#[derive(Parser, Debug)]
#[command(about = "Walk the Vibecade hub in a wgpu window", version)]
pub struct Args {
    /// Hub configuration JSON; built-in layout when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the NPC crowd, overriding the config file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial window width in physical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in physical pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Keep activated games inside the hub instead of opening them externally
    #[arg(long)]
    pub no_launch: bool,

    /// Build the world and step it once without opening a window
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    pub fn hub_config(&self) -> Result<HubConfig> {
        let mut config = match self.config.as_ref() {
            Some(path) => HubConfig::from_json_file(path)
                .with_context(|| format!("loading hub config {}", path.display()))?,
            None => HubConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.rng_seed = Some(seed);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_flag_overrides_config() {
        let args = Args::parse_from(["vibecade_viewer", "--seed", "42"]);
        let config = args.hub_config().expect("default config");
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!((args.width, args.height), (1280, 720));
        assert!(!args.headless);
        assert!(!args.no_launch);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = Args::parse_from(["vibecade_viewer", "--config", "/nonexistent/hub.json"]);
        let err = args.hub_config().expect_err("missing file");
        assert!(format!("{err:#}").contains("loading hub config"));
    }
}
