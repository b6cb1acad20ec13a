mod window;

use std::path::PathBuf;

use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

use tetra_orbit::config::Config;
use tetra_orbit::error::DemoError;

/// Hover over a tetrahedron to wake its orbs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON scene config; built-in reference scene when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for orb placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> Result<(), DemoError> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = window::App::new(config, args.width, args.height);
    event_loop.run_app(&mut app)?;
    app.finish()
}
