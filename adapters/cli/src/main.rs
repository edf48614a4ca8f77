#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Hex Hunt experience.

mod presenter;

use anyhow::Result;
use clap::Parser;
use hexhunt_rendering::{Color, Presentation, RenderingBackend, Scene};
use hexhunt_rendering_macroquad::MacroquadBackend;
use presenter::Presenter;
use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

/// Night-sky backdrop behind the island.
const BACKDROP: Color = Color::from_rgb_u8(0x10, 0x14, 0x1e);

/// Find the hidden alien on a procedurally generated hex island.
#[derive(Debug, Parser)]
#[command(name = "hexhunt", version, about)]
struct Args {
    /// Deterministic session seed; falls back to the HEXHUNT_SEED
    /// environment variable, then to wall-clock entropy.
    #[arg(long)]
    seed: Option<u64>,
    /// Print frame timing metrics once per second.
    #[arg(long)]
    fps: bool,
    /// Render as fast as possible instead of syncing to the display.
    #[arg(long)]
    no_vsync: bool,
}

/// Entry point for the Hex Hunt command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let seed = resolve_seed(args.seed);
    println!("session seed: {seed}");

    let mut presenter = Presenter::new(seed);
    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.fps);
    let presentation = Presentation::new("Hex Hunt", BACKDROP, Scene::empty());

    backend.run(presentation, move |dt, input, scene| {
        presenter.frame(dt, input, scene);
    })
}

fn resolve_seed(cli_seed: Option<u64>) -> u64 {
    if let Some(seed) = cli_seed {
        return seed;
    }

    if let Ok(raw) = env::var("HEXHUNT_SEED") {
        match raw.parse() {
            Ok(seed) => return seed,
            Err(_) => eprintln!("warning: ignoring unparsable HEXHUNT_SEED value `{raw}`"),
        }
    }

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
