//! winit application driving the probe

use crate::hud;
use crate::pacing::FramePacer;
use anyhow::{Context, Result};
use lagprobe_core::{CursorAdapter, Presentation, Probe};
use lagprobe_metrics::FrameTimer;
use lagprobe_render::window::{window_attributes, WindowConfig};
use lagprobe_render::{wgpu, Presenter, QuadBatch};
use lagprobe_services::input::FrameInput;
use lagprobe_services::ProbeSettings;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::WindowId,
};

/// Everything that only exists once the window does.
struct Session {
    presenter: Presenter,
    cursor: Arc<dyn CursorAdapter>,
    probe: Probe,
    status_text: String,
}

pub struct App {
    settings: ProbeSettings,
    session: Option<Session>,
    input: FrameInput,
    timer: FrameTimer,
    pacer: FramePacer,
    batch: QuadBatch,
    fatal: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: ProbeSettings) -> Self {
        Self {
            settings,
            session: None,
            input: FrameInput::new(),
            timer: FrameTimer::new(),
            pacer: FramePacer::new(),
            batch: QuadBatch::new(1, 1),
            fatal: None,
        }
    }

    /// Startup failure that ended the event loop, if any.
    pub fn into_result(self) -> Result<()> {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start_session(&self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let config = WindowConfig {
            title: self.settings.window.title.clone(),
            width: self.settings.window.width,
            height: self.settings.window.height,
            display_mode: self.settings.window.display_mode,
        };
        let window = Arc::new(
            event_loop
                .create_window(window_attributes(&config))
                .context("failed to create window")?,
        );

        let mut presenter = pollster::block_on(Presenter::new(Arc::clone(&window)))
            .context("failed to initialize graphics")?;

        let cursor = lagprobe_env::connect_cursor(&window).context("cannot control the system cursor")?;
        tracing::info!(backend = cursor.name(), "cursor backend connected");
        if let Ok(origin) = window.inner_position() {
            cursor.observe_window_origin(origin.x, origin.y);
        }

        let host = lagprobe_env::host::host_info(format!("lagprobe {}", lagprobe_core::VERSION));
        let mut probe = Probe::new(
            Arc::clone(&cursor),
            &self.settings.motion,
            self.settings.overlay.clone(),
            host,
        );

        presenter.set_display_mode(config.display_mode);

        if self.settings.motion.autostart {
            probe.start().context("failed to start cursor motion")?;
        }

        window.request_redraw();

        Ok(Session {
            presenter,
            cursor,
            probe,
            status_text: String::new(),
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        self.timer.tick();

        if let Ok(origin) = session.presenter.window().inner_position() {
            session.cursor.observe_window_origin(origin.x, origin.y);
        }

        self.input.begin_frame();
        session.probe.begin_frame(&self.input, &session.presenter);

        for command in self.input.take_pressed() {
            if let Err(err) = session.probe.handle_command(command, &mut session.presenter) {
                tracing::error!(error = %err, ?command, "command failed");
            }
        }

        if session.probe.refresh_status(&session.presenter) {
            session.status_text = session
                .probe
                .status()
                .map(ToString::to_string)
                .unwrap_or_default();
        }

        session.probe.delay_frame();

        let (width, height) = session.presenter.surface_size();
        self.batch.begin(width, height);
        session.probe.draw_overlay(&mut self.batch);
        hud::draw_status(&mut self.batch, &session.status_text);
        hud::draw_fps(&mut self.batch, &self.timer.readout());

        match session.presenter.render(&self.batch) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                session.presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("out of GPU memory");
                event_loop.exit();
            }
            Err(err) => tracing::warn!(error = %err, "frame dropped"),
        }

        self.pacer
            .frame_presented(session.presenter.frame_rate_cap(), Instant::now());
    }

    fn shutdown(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.probe.stop();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.start_session(event_loop) {
            Ok(session) => self.session = Some(session),
            Err(err) => {
                tracing::error!(error = ?err, "startup failed");
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(session) = self.session.as_mut() {
                    session.presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.key_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.pointer_moved(position.x as f32, position.y as f32);
                if let Some(session) = &self.session {
                    session
                        .cursor
                        .observe_pointer(position.x.round() as i32, position.y.round() as i32);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = &self.session else {
            return;
        };
        if self.pacer.is_due(Instant::now()) {
            session.presenter.window().request_redraw();
        }
        event_loop.set_control_flow(self.pacer.control_flow());
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
        tracing::info!("lagprobe exiting");
    }
}
