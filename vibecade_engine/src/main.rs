use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vibecade_engine::{
    Activation, FrameClock, FrameScheduler, HubConfig, HubTrace, HubWorld, InputScript,
    InputSnapshot, NullRenderer, RecordingOverlay, ScriptedInput,
};

/// Runs the arcade hub without a window and reports what happened.
#[derive(Parser, Debug)]
#[command(about = "Headless runner for the Vibecade hub simulation", version)]
struct Args {
    /// JSON file overriding the default hub configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for NPC speeds and targets (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// JSON input script to replay (default: built-in demo walk)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seconds of simulated time per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    step: f64,

    /// Path to write the per-tick trace as JSON
    #[arg(long)]
    trace_json: Option<PathBuf>,

    /// Print every activation and dismissal as it happens
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config.as_deref() {
        Some(path) => HubConfig::from_json_file(path)
            .with_context(|| format!("loading hub config {}", path.display()))?,
        None => HubConfig::default(),
    };
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "--step must be a positive number of seconds (got {})",
        args.step
    );

    let script = match args.script.as_deref() {
        Some(path) => InputScript::from_json_file(path).context("loading input script")?,
        None => InputScript::demo(),
    };

    let mut world = HubWorld::new(&config).context("building hub world")?;
    let mut scheduler = FrameScheduler::new(FrameClock::fixed(args.step));
    let mut scripted = ScriptedInput::new(script);
    let mut input = InputSnapshot::new();
    let mut overlay = RecordingOverlay::new();
    let mut renderer = NullRenderer;
    let mut trace = args
        .trace_json
        .as_ref()
        .map(|_| HubTrace::new(config.rng_seed, args.step));
    let mut activations = Vec::new();

    for _ in 0..args.ticks {
        let cue = scripted.feed(&mut input);
        let report = match scheduler.frame(&mut world, &mut input, &mut overlay, &mut renderer) {
            Ok(report) => report,
            Err(never) => match never {},
        };
        if args.verbose {
            if let Some(activation) = report.activated.as_ref() {
                println!(
                    "tick {:>5}: opened {} ({})",
                    report.tick, activation.name, activation.locator
                );
            }
            if report.dismissed {
                println!("tick {:>5}: overlay dismissed", report.tick);
            }
        }
        if let Some(trace) = trace.as_mut() {
            trace.record(&world, &report);
        }
        if let Some(activation) = report.activated {
            activations.push(activation);
        }
        if cue.dismiss {
            overlay.request_dismissal();
        }
    }

    if let (Some(path), Some(trace)) = (args.trace_json.as_ref(), trace.as_ref()) {
        trace.write_json(path)?;
        println!("Saved hub trace to {}", path.display());
    }

    print_summary(&world, &activations);
    Ok(())
}

fn print_summary(world: &HubWorld, activations: &[Activation]) {
    println!("Ticks simulated: {}", world.ticks());
    println!("Activations: {}", activations.len());
    for activation in activations {
        println!("  - {} -> {}", activation.name, activation.locator);
    }
    println!(
        "Overlay: {}",
        if world.overlay_active() { "open" } else { "closed" }
    );

    let player = world.player();
    let position = player.entity.position;
    println!(
        "Player: ({:.2}, {:.2}, {:.2}) yaw {:.3} camera distance {:.1}",
        position.x, position.y, position.z, player.entity.rotation_y, player.camera_distance
    );
    if let Some(portal) = world.portals().first_in_range(position) {
        println!("  in range of {}", portal.name());
    }

    println!("NPCs:");
    for (index, agent) in world.agents().iter().enumerate() {
        let position = agent.entity().position;
        println!(
            "  {:>2}. ({:.2}, {:.2}) speed {:.3}",
            index, position.x, position.z, agent.speed()
        );
    }
}
