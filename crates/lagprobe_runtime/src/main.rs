//! Lagprobe Runtime
//!
//! Opens the probe window, moves the system cursor and draws the latency
//! reference overlay until closed.

mod app;
mod hud;
mod pacing;

use anyhow::{Context, Result};
use clap::Parser;
use lagprobe_core::DisplayMode;
use lagprobe_services::logging::init_logging;
use lagprobe_services::ProbeSettings;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Debug, Parser)]
#[command(name = "lagprobe", version, about = "Visual input-to-photon latency probe")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial cursor speed in pixels per millisecond
    #[arg(long)]
    velocity: Option<f32>,

    /// Start in a window instead of fullscreen
    #[arg(long)]
    windowed: bool,

    /// Do not move the cursor until Space is pressed
    #[arg(long)]
    no_autostart: bool,

    /// Log filter, e.g. "debug" or "lagprobe_core=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn settings(&self) -> Result<ProbeSettings> {
        let mut settings = match &self.config {
            Some(path) => ProbeSettings::load(path)
                .with_context(|| format!("cannot use settings file {}", path.display()))?,
            None => ProbeSettings::default(),
        };
        self.apply(&mut settings);
        Ok(settings)
    }

    fn apply(&self, settings: &mut ProbeSettings) {
        if let Some(velocity) = self.velocity {
            settings.motion.initial_velocity_px_per_ms = velocity;
        }
        if self.windowed {
            settings.window.display_mode = DisplayMode::Windowed;
        }
        if self.no_autostart {
            settings.motion.autostart = false;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
        if self.json_logs {
            settings.logging.json = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = args.settings()?;

    init_logging(&settings.logging);

    tracing::info!("Lagprobe v{}", lagprobe_core::VERSION);
    tracing::debug!(?settings, "settings");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(settings);
    event_loop.run_app(&mut app).context("event loop failed")?;
    app.into_result()
}
