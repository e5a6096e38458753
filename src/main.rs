//! Edgecore headless runner.
//!
//! Drives a [`Game`] with a simulated display clock and the built-in demo
//! input script, logging JSON world snapshots through the render sink.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 900 --snapshot-every 30
//! ```

use std::path::PathBuf;

use clap::Parser;
use edgecore::components::movementstate::MovementState;
use edgecore::components::transform::Transform;
use edgecore::demo::DemoScript;
use edgecore::game::Game;
use edgecore::render::JsonSnapshotSink;
use edgecore::resources::gameconfig::GameConfig;

/// Headless platformer core simulation.
#[derive(Parser)]
#[command(version, about = "Runs the platformer gameplay core headless with scripted input")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of display frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated display rate in frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Emit a world snapshot every N frames (0 disables).
    #[arg(long, default_value_t = 60)]
    snapshot_every: u64,

    /// Override the configured time scale.
    #[arg(long)]
    time_scale: Option<f32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::info!("Using default configuration ({})", e);
    }
    if let Some(scale) = cli.time_scale {
        config.time_scale = scale;
    }

    let mut game = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    game.set_render_sink(Box::new(JsonSnapshotSink::new(cli.snapshot_every)));

    let frame_ms = 1000.0 / cli.fps.max(1.0);
    let mut script = DemoScript::showcase();

    game.start();
    for frame in 0..cli.frames {
        let now = frame as f64 * frame_ms;
        let result = script
            .apply_until(now, game.resources_mut())
            .and_then(|_| game.frame(now));
        if let Err(e) = result {
            eprintln!("Error: {e}");
            game.shutdown();
            std::process::exit(1);
        }
    }

    if let Some(player) = game.player() {
        let world = game.world();
        if let (Some(transform), Some(state)) = (
            world.get_component::<Transform>(player),
            world.get_component::<MovementState>(player),
        ) {
            log::info!(
                "Player {} finished at ({:.1}, {:.1}) in {:?} after {:.0}ms of game time",
                player,
                transform.x,
                transform.y,
                state.current_state(),
                game.time().elapsed_ms()
            );
        }
    }
    game.shutdown();
}
