//! wgpu-backed presentation
//!
//! Owns the surface and translates the probe's presentation requests into
//! surface configuration and window fullscreen state.

use crate::backend::BackendType;
use crate::batch::QuadBatch;
use crate::renderer::OverlayPipeline;
use crate::window::{display_mode_for, exclusive_mode_for, fullscreen_for};
use crate::RenderError;
use lagprobe_core::presentation::{AppliedSettings, DisplayGeometry, SettingOutcome};
use lagprobe_core::time::FALLBACK_REFRESH_HZ;
use lagprobe_core::{DisplayMode, Presentation};
use std::sync::Arc;
use winit::window::{Fullscreen, Window};

/// Swapchain depth used until a profile asks for another.
pub const DEFAULT_QUEUED_FRAMES: u32 = 2;

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Present mode for a vsync request, given what the surface offers, and a
/// warning when the request cannot be met.
pub fn choose_present_mode(
    vsync: bool,
    available: &[wgpu::PresentMode],
) -> (wgpu::PresentMode, Option<String>) {
    if vsync {
        // Fifo is the one mode every surface must support.
        return (wgpu::PresentMode::Fifo, None);
    }
    if available.contains(&wgpu::PresentMode::Immediate) {
        (wgpu::PresentMode::Immediate, None)
    } else if available.contains(&wgpu::PresentMode::Mailbox) {
        (
            wgpu::PresentMode::Mailbox,
            Some("Immediate unavailable; Mailbox does not tear".to_string()),
        )
    } else {
        (
            wgpu::PresentMode::Fifo,
            Some("surface cannot present without vsync".to_string()),
        )
    }
}

pub fn refresh_hz_from_millihertz(millihertz: Option<u32>) -> f32 {
    match millihertz {
        Some(mhz) if mhz > 0 => mhz as f32 / 1000.0,
        _ => FALLBACK_REFRESH_HZ,
    }
}

pub struct Presenter {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    present_modes: Vec<wgpu::PresentMode>,
    backend: BackendType,
    pipeline: OverlayPipeline,
    vsync: bool,
    frame_rate_cap: Option<u32>,
}

impl Presenter {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let info = adapter.get_info();
        let backend = BackendType::from_wgpu(info.backend);
        tracing::info!(adapter = %info.name, %backend, "graphics adapter selected");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Lagprobe Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Overlay colors are specified in display values, so skip sRGB encoding.
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        tracing::debug!(?format, present_modes = ?surface_caps.present_modes, "surface capabilities");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: DEFAULT_QUEUED_FRAMES,
        };
        surface.configure(&device, &config);

        let pipeline = OverlayPipeline::new(&device, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            present_modes: surface_caps.present_modes,
            backend,
            pipeline,
            vsync: true,
            frame_rate_cap: None,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn frame_rate_cap(&self) -> Option<u32> {
        self.frame_rate_cap
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, batch: &QuadBatch) -> Result<(), wgpu::SurfaceError> {
        let vertices = batch.vertices();
        self.pipeline.upload(&self.device, &self.queue, vertices);

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Overlay Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.pipeline.draw(&mut render_pass, vertices.len() as u32);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }

    fn exclusive_available(&self) -> bool {
        self.backend.supports_exclusive_fullscreen()
            && self
                .window
                .current_monitor()
                .as_ref()
                .and_then(exclusive_mode_for)
                .is_some()
    }
}

impl Presentation for Presenter {
    fn set_vsync(&mut self, enabled: bool) -> SettingOutcome {
        let (mode, warning) = choose_present_mode(enabled, &self.present_modes);
        self.vsync = enabled;
        self.config.present_mode = mode;
        self.reconfigure();
        tracing::debug!(enabled, present_mode = ?mode, "vsync set");
        match warning {
            Some(reason) => SettingOutcome::ignored(reason),
            None => SettingOutcome::Applied,
        }
    }

    fn set_queued_frame_depth(&mut self, frames: u32) -> SettingOutcome {
        let frames = frames.max(1);
        self.config.desired_maximum_frame_latency = frames;
        self.reconfigure();
        if self.backend.controls_frame_queue() {
            SettingOutcome::Applied
        } else {
            SettingOutcome::ignored(format!("{} does not limit queued frames", self.backend))
        }
    }

    fn set_frame_rate_cap(&mut self, fps: Option<u32>) {
        self.frame_rate_cap = fps.filter(|fps| *fps > 0);
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        let mut mode = mode;
        if mode == DisplayMode::ExclusiveFullscreen && !self.exclusive_available() {
            tracing::warn!(backend = %self.backend, "exclusive fullscreen unavailable, using fullscreen window");
            mode = DisplayMode::FullscreenWindowed;
        }

        let fullscreen = fullscreen_for(mode, self.window.current_monitor());
        self.window.set_fullscreen(fullscreen);
        tracing::info!(requested = %mode, actual = %self.display_mode(), "display mode changed");
    }

    /// Read back from the window, which may refuse or later leave fullscreen.
    fn display_mode(&self) -> DisplayMode {
        display_mode_for(self.window.fullscreen().as_ref())
    }

    fn supports_display_mode(&self, mode: DisplayMode) -> bool {
        match mode {
            DisplayMode::Windowed | DisplayMode::FullscreenWindowed => true,
            DisplayMode::ExclusiveFullscreen => self.exclusive_available(),
        }
    }

    fn refresh_rate_hz(&self) -> f32 {
        let millihertz = match self.window.fullscreen() {
            Some(Fullscreen::Exclusive(video_mode)) => Some(video_mode.refresh_rate_millihertz()),
            _ => self
                .window
                .current_monitor()
                .and_then(|monitor| monitor.refresh_rate_millihertz()),
        };
        refresh_hz_from_millihertz(millihertz)
    }

    fn display_geometry(&self) -> DisplayGeometry {
        let size = self.window.inner_size();
        let origin_x = self
            .window
            .inner_position()
            .map(|position| position.x)
            .unwrap_or(0);
        DisplayGeometry {
            width: i32::try_from(size.width).unwrap_or(i32::MAX),
            origin_x,
            height: i32::try_from(size.height).unwrap_or(i32::MAX),
        }
    }

    fn applied_settings(&self) -> AppliedSettings {
        AppliedSettings {
            vsync: self.vsync,
            present_mode: format!("{:?}", self.config.present_mode),
            queued_frames: self.config.desired_maximum_frame_latency,
            frame_rate_cap: self.frame_rate_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::PresentMode;

    #[test]
    fn vsync_always_uses_fifo() {
        assert_eq!(choose_present_mode(true, &[PresentMode::Immediate]), (PresentMode::Fifo, None));
    }

    #[test]
    fn no_vsync_prefers_immediate() {
        let available = [PresentMode::Fifo, PresentMode::Mailbox, PresentMode::Immediate];
        assert_eq!(choose_present_mode(false, &available), (PresentMode::Immediate, None));
    }

    #[test]
    fn no_vsync_falls_back_to_mailbox() {
        let available = [PresentMode::Fifo, PresentMode::Mailbox];
        let (mode, warning) = choose_present_mode(false, &available);
        assert_eq!(mode, PresentMode::Mailbox);
        assert_eq!(
            warning.as_deref(),
            Some("Immediate unavailable; Mailbox does not tear")
        );
    }

    #[test]
    fn fifo_only_surface_warns() {
        let (mode, warning) = choose_present_mode(false, &[PresentMode::Fifo]);
        assert_eq!(mode, PresentMode::Fifo);
        assert!(warning.is_some());
    }

    #[test]
    fn refresh_falls_back_when_unknown() {
        assert_eq!(refresh_hz_from_millihertz(Some(143_856)), 143.856);
        assert_eq!(refresh_hz_from_millihertz(Some(0)), FALLBACK_REFRESH_HZ);
        assert_eq!(refresh_hz_from_millihertz(None), FALLBACK_REFRESH_HZ);
    }
}
