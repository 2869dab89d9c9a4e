//! Probe controller
//!
//! Ties the motion generator, sampler, profiles and overlay together and
//! drives them from the host's frame loop:
//!
//! ```ignore
//! probe.begin_frame(&input, &presentation);
//! for command in input.pressed() {
//!     probe.handle_command(command, &mut presentation)?;
//! }
//! probe.delay_frame();
//! probe.draw_overlay(&mut canvas);
//! ```

use crate::cursor::CursorAdapter;
use crate::error::ProbeResult;
use crate::latency::AdditionalLatency;
use crate::motion::{MotionConfig, MotionGenerator};
use crate::overlay::{Canvas, OverlayRenderer, OverlayStyle};
use crate::presentation::Presentation;
use crate::profile::{cycle_display_mode, IdealWindow, ProfileKind, ProfileManager};
use crate::sampler::{FrameSample, FrameSampler, PointerSource};
use crate::status::{HostInfo, StatusReport};
use std::sync::Arc;

/// Discrete user commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SpeedUp,
    SlowDown,
    MoreLatency,
    LessLatency,
    CycleDisplayMode,
    SelectProfile(ProfileKind),
    Start,
    Stop,
}

pub struct Probe {
    motion: MotionGenerator,
    sampler: FrameSampler,
    profiles: ProfileManager,
    overlay: OverlayRenderer,
    latency: AdditionalLatency,
    host: HostInfo,
    status: Option<StatusReport>,
    status_dirty: bool,
}

impl Probe {
    pub fn new(cursor: Arc<dyn CursorAdapter>, motion: &MotionConfig, style: OverlayStyle, host: HostInfo) -> Self {
        Self {
            motion: MotionGenerator::new(cursor, motion),
            sampler: FrameSampler::new(),
            profiles: ProfileManager::new(),
            overlay: OverlayRenderer::new(style),
            latency: AdditionalLatency::default(),
            host,
            status: None,
            status_dirty: true,
        }
    }

    pub fn motion(&self) -> &MotionGenerator {
        &self.motion
    }

    pub fn profiles(&self) -> &ProfileManager {
        &self.profiles
    }

    pub fn latency(&self) -> AdditionalLatency {
        self.latency
    }

    pub fn start(&mut self) -> ProbeResult<()> {
        self.status_dirty = true;
        self.motion.start()
    }

    pub fn stop(&mut self) {
        self.status_dirty = true;
        self.motion.stop();
    }

    /// Snapshot pointer and display state for the frame about to be drawn.
    pub fn begin_frame<I, P>(&mut self, input: &I, presentation: &P) -> FrameSample
    where
        I: PointerSource + ?Sized,
        P: Presentation + ?Sized,
    {
        let sample = self.sampler.sample(input, presentation);
        self.motion
            .state()
            .set_track(sample.display_origin_x, sample.display_width);

        // Mode switches can take a frame to land; refresh once they do.
        if self.status.as_ref().map(|s| s.display_mode) != Some(sample.display_mode) {
            self.status_dirty = true;
        }
        sample
    }

    pub fn handle_command<P: Presentation + ?Sized>(&mut self, command: Command, presentation: &mut P) -> ProbeResult<()> {
        tracing::debug!(?command, "command");
        match command {
            Command::SpeedUp => {
                self.motion.state().speed_up();
            }
            Command::SlowDown => {
                self.motion.state().slow_down();
            }
            Command::MoreLatency => {
                self.latency.increase();
            }
            Command::LessLatency => {
                self.latency.decrease();
            }
            Command::CycleDisplayMode => {
                cycle_display_mode(presentation);
            }
            Command::SelectProfile(kind) => {
                self.profiles.select(kind, presentation);
            }
            Command::Start => self.motion.start()?,
            Command::Stop => self.motion.stop(),
        }
        self.status_dirty = true;
        Ok(())
    }

    /// Sleep for the injected frame cost. Frame thread only.
    pub fn delay_frame(&self) {
        self.latency.apply();
    }

    /// Ideal window of the active profile for this frame's display mode.
    pub fn ideal_window(&self) -> Option<IdealWindow> {
        self.profiles.ideal_window(self.sampler.current().display_mode)
    }

    pub fn draw_overlay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        self.overlay.draw(
            self.sampler.current(),
            self.motion.state().velocity(),
            self.ideal_window(),
            canvas,
        );
    }

    /// Rebuild the status report if anything it shows has changed.
    ///
    /// Returns `true` when the report was rebuilt.
    pub fn refresh_status<P: Presentation + ?Sized>(&mut self, presentation: &P) -> bool {
        if !self.status_dirty && self.status.is_some() {
            return false;
        }
        self.status = Some(StatusReport {
            host: self.host.clone(),
            profile_name: self.profiles.display_name(),
            applied: presentation.applied_settings(),
            display_mode: presentation.display_mode(),
            additional_frame_time_ms: self.latency.extra_ms(),
            velocity_px_per_ms: self.motion.state().velocity(),
            running: self.motion.is_running(),
        });
        self.status_dirty = false;
        true
    }

    pub fn status(&self) -> Option<&StatusReport> {
        self.status.as_ref()
    }
}
