//! Orbit headless runner
//!
//! Drives the simulation without a window: ticks at full speed, holds the
//! hook key from a chosen tick onward and logs player snapshots.

use std::path::PathBuf;

use clap::Parser;

use orbit::Settings;
use orbit::renderer::ViewportConfig;
use orbit::sim::{GameState, HookState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Circle field seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tick at which the hook key goes down
    #[arg(long, default_value_t = 30)]
    hook_from: u64,

    /// Tick at which the hook key is released (never if omitted)
    #[arg(long)]
    hook_until: Option<u64>,

    /// Log a snapshot every N ticks
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// Window width used to report device coordinates
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Window height used to report device coordinates
    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn run(args: &Args) -> Result<(), orbit::ConfigError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let mut state = GameState::new(&settings)?;
    state.set_viewport_config(ViewportConfig::from_window(args.width, args.height));
    log::info!("Orbit (headless) starting, {} ticks", args.ticks);

    let log_every = args.log_every.max(1);
    for t in 0..args.ticks {
        if t == args.hook_from {
            state.on_key_press("hook");
        }
        if Some(t) == args.hook_until {
            state.on_key_release("hook");
        }

        if !state.tick() {
            break;
        }

        if state.ticks() % log_every == 0 {
            let snapshot = state.player_snapshot();
            let device = state.viewport().to_device(snapshot.position);
            let hook = match snapshot.hook_state {
                HookState::Free => "free".to_string(),
                HookState::Targeting { circle, .. } => {
                    format!("targeting ({:.3}, {:.3})", circle.x, circle.y)
                }
                HookState::Hooked { circle, rotation } => {
                    format!("hooked ({:.3}, {:.3}) {:?}", circle.x, circle.y, rotation)
                }
            };
            log::info!(
                "tick {:5} screen {:3} pos ({:.3}, {:.3}) angle {:.3} [{}] device ({:.1}, {:.1})",
                state.ticks(),
                state.player().screen_index(),
                snapshot.position.x,
                snapshot.position.y,
                snapshot.angle,
                hook,
                device.x,
                device.y
            );
        }
    }

    let elapsed = settings.tick_interval().mul_f64(state.ticks() as f64);
    log::info!(
        "Done after {} ticks (~{:.1}s of game time), {} bands generated",
        state.ticks(),
        elapsed.as_secs_f64(),
        state.field().generated_bands()
    );
    Ok(())
}
