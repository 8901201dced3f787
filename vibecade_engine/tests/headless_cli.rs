use std::fs;
use std::process::Command;

use anyhow::{Context, Result};
use serde::Deserialize;
use tempfile::tempdir;

#[derive(Debug, Deserialize)]
struct Trace {
    seed: Option<u64>,
    samples: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct Sample {
    tick: u64,
    player_visible: bool,
    npc_positions: Vec<[f32; 3]>,
    #[serde(default)]
    activated: Option<Activation>,
}

#[derive(Debug, Deserialize)]
struct Activation {
    name: String,
    locator: String,
}

#[test]
fn demo_run_writes_trace() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for hub trace")?;
    let trace_path = temp_dir.path().join("trace.json");

    let output = Command::new(env!("CARGO_BIN_EXE_vibecade_engine"))
        .args(["--seed", "7", "--ticks", "200", "--trace-json"])
        .arg(&trace_path)
        .output()
        .context("executing vibecade_engine")?;

    assert!(
        output.status.success(),
        "vibecade_engine exited with {:?}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Activations: 1"), "summary was:\n{stdout}");

    let trace: Trace = serde_json::from_str(&fs::read_to_string(&trace_path)?)
        .context("parsing hub trace")?;
    assert_eq!(trace.seed, Some(7));
    assert_eq!(trace.samples.len(), 200);
    assert!(trace.samples.iter().all(|sample| sample.npc_positions.len() == 5));

    let (tick, activation) = trace
        .samples
        .iter()
        .find_map(|sample| sample.activated.as_ref().map(|a| (sample.tick, a)))
        .context("demo run should open a cabinet")?;
    assert_eq!(tick, 78);
    assert_eq!(activation.name, "Hot Air Balloon");
    assert_eq!(activation.locator, "https://www.hotairvibe.com/game");
    assert!(!trace.samples[90].player_visible);
    assert!(trace.samples[199].player_visible);
    Ok(())
}

#[test]
fn invalid_config_fails_with_context() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for config")?;
    let config_path = temp_dir.path().join("hub.json");
    fs::write(&config_path, r#"{ "min_camera_distance": 30.0 }"#)?;

    let output = Command::new(env!("CARGO_BIN_EXE_vibecade_engine"))
        .arg("--config")
        .arg(&config_path)
        .args(["--ticks", "1"])
        .output()
        .context("executing vibecade_engine")?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("building hub world"), "stderr was:\n{stderr}");
    Ok(())
}

#[test]
fn custom_script_is_replayed() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary directory for script")?;
    let script_path = temp_dir.path().join("walk.json");
    fs::write(
        &script_path,
        r#"{ "segments": [ { "label": "forward", "ticks": 10, "keys": "w" } ] }"#,
    )?;

    let output = Command::new(env!("CARGO_BIN_EXE_vibecade_engine"))
        .arg("--script")
        .arg(&script_path)
        .args(["--seed", "3", "--ticks", "20"])
        .output()
        .context("executing vibecade_engine")?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Activations: 0"), "summary was:\n{stdout}");
    assert!(stdout.contains(", 3.00) yaw"), "summary was:\n{stdout}");
    Ok(())
}

#[test]
fn summary_counts_activations_without_a_trace() -> Result<()> {
    let temp_dir = tempdir().context("creating temporary working directory")?;

    let output = Command::new(env!("CARGO_BIN_EXE_vibecade_engine"))
        .current_dir(temp_dir.path())
        .args(["--seed", "7", "--ticks", "200"])
        .output()
        .context("executing vibecade_engine")?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Activations: 1"), "summary was:\n{stdout}");
    assert!(
        stdout.contains("  - Hot Air Balloon -> https://www.hotairvibe.com/game"),
        "summary was:\n{stdout}"
    );
    assert!(!stdout.contains("Saved hub trace"), "summary was:\n{stdout}");
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}
