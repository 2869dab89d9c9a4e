//! Constant-velocity cursor motion
//!
//! A dedicated thread warps the system cursor along a horizontal sweep at a
//! fixed pixels-per-millisecond rate. It never synchronizes with frame
//! production: the gap between where the sweep says the cursor is and where
//! a frame shows it is exactly what the overlay visualizes.

use crate::cursor::CursorAdapter;
use crate::error::ProbeResult;
use crate::time::MOTION_TICK;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Velocity factor applied by one speed-up/slow-down command.
pub const VELOCITY_STEP: f32 = 1.1;

/// Motion parameters read from settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub initial_velocity_px_per_ms: f32,
    /// Sleep between cursor updates, in milliseconds.
    pub tick_ms: u64,
    /// Start moving the cursor as soon as the probe is up.
    pub autostart: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            initial_velocity_px_per_ms: 1.0,
            tick_ms: MOTION_TICK.as_millis() as u64,
            autostart: true,
        }
    }
}

/// Sweep parameters shared between the frame loop and the motion thread.
///
/// The frame loop writes velocity and track geometry; the motion thread only
/// reads them. Atomics give the "latest value eventually visible" guarantee
/// the sweep needs and nothing more.
#[derive(Debug)]
pub struct MotionState {
    velocity_bits: AtomicU32,
    origin_x: AtomicI32,
    track_width: AtomicI32,
    start: Instant,
}

impl MotionState {
    pub fn new(velocity_px_per_ms: f32) -> Self {
        let state = Self {
            velocity_bits: AtomicU32::new(0),
            origin_x: AtomicI32::new(0),
            track_width: AtomicI32::new(0),
            start: Instant::now(),
        };
        state.set_velocity(velocity_px_per_ms);
        state
    }

    pub fn velocity(&self) -> f32 {
        f32::from_bits(self.velocity_bits.load(Ordering::Acquire))
    }

    /// Store a new velocity, clamped to the zero floor.
    pub fn set_velocity(&self, velocity_px_per_ms: f32) {
        let clamped = if velocity_px_per_ms.is_finite() {
            velocity_px_per_ms.max(0.0)
        } else {
            0.0
        };
        self.velocity_bits.store(clamped.to_bits(), Ordering::Release);
    }

    pub fn speed_up(&self) -> f32 {
        self.set_velocity(self.velocity() * VELOCITY_STEP);
        self.velocity()
    }

    pub fn slow_down(&self) -> f32 {
        self.set_velocity(self.velocity() / VELOCITY_STEP);
        self.velocity()
    }

    /// Update the horizontal span the sweep covers, in desktop pixels.
    pub fn set_track(&self, origin_x: i32, width: i32) {
        self.origin_x.store(origin_x, Ordering::Release);
        self.track_width.store(width, Ordering::Release);
    }

    pub fn origin_x(&self) -> i32 {
        self.origin_x.load(Ordering::Acquire)
    }

    pub fn track_width(&self) -> i32 {
        self.track_width.load(Ordering::Acquire)
    }

    /// Time origin of the sweep; fixed for the lifetime of the state.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Desktop x the sweep has reached after `elapsed`, or `None` while the
    /// track is empty.
    pub fn cursor_x(&self, elapsed: Duration) -> Option<i32> {
        let width = self.track_width();
        track_offset(elapsed, self.velocity(), width).map(|offset| self.origin_x() + offset)
    }
}

/// Offset into the track: `floor(elapsed_ms * velocity) mod width`.
///
/// Always in `[0, width)`; `None` when `width <= 0`.
pub fn track_offset(elapsed: Duration, velocity_px_per_ms: f32, width: i32) -> Option<i32> {
    if width <= 0 {
        return None;
    }
    let travelled = (elapsed.as_secs_f64() * 1000.0 * velocity_px_per_ms.max(0.0) as f64).floor();
    let travelled = if travelled.is_finite() { travelled as i64 } else { 0 };
    Some(travelled.rem_euclid(width as i64) as i32)
}

/// Owns the motion thread.
///
/// `start` and `stop` are idempotent. `stop` joins the thread, so once it
/// returns the cursor is no longer written.
pub struct MotionGenerator {
    state: Arc<MotionState>,
    cursor: Arc<dyn CursorAdapter>,
    tick: Duration,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MotionGenerator {
    pub fn new(cursor: Arc<dyn CursorAdapter>, config: &MotionConfig) -> Self {
        Self {
            state: Arc::new(MotionState::new(config.initial_velocity_px_per_ms)),
            cursor,
            tick: Duration::from_millis(config.tick_ms.max(1)),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn state(&self) -> &Arc<MotionState> {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start(&mut self) -> ProbeResult<()> {
        if self.handle.is_some() {
            return Ok(());
        }

        self.running.store(true, Ordering::Release);
        let state = Arc::clone(&self.state);
        let cursor = Arc::clone(&self.cursor);
        let running = Arc::clone(&self.running);
        let tick = self.tick;

        let spawned = thread::Builder::new()
            .name("lagprobe-motion".to_string())
            .spawn(move || run_sweep(&state, cursor.as_ref(), &running, tick));

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!(backend = self.cursor.name(), "cursor motion started");
                Ok(())
            }
            Err(err) => {
                self.running.store(false, Ordering::Release);
                Err(err.into())
            }
        }
    }

    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.running.store(false, Ordering::Release);
        if handle.join().is_err() {
            tracing::error!("motion thread panicked");
        }
        tracing::info!("cursor motion stopped");
    }
}

impl Drop for MotionGenerator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_sweep(state: &MotionState, cursor: &dyn CursorAdapter, running: &AtomicBool, tick: Duration) {
    while running.load(Ordering::Acquire) {
        if let Some(x) = state.cursor_x(state.start().elapsed()) {
            // Only horizontal motion is probed; keep whatever y the user has.
            let (_, y) = cursor.cursor_position();
            cursor.set_cursor_position(x, y);
        }
        thread::sleep(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct RecordingCursor {
        x: AtomicI32,
        y: AtomicI32,
        writes: AtomicUsize,
    }

    impl CursorAdapter for RecordingCursor {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn cursor_position(&self) -> (i32, i32) {
            (self.x.load(Ordering::SeqCst), self.y.load(Ordering::SeqCst))
        }

        fn set_cursor_position(&self, x: i32, y: i32) {
            self.x.store(x, Ordering::SeqCst);
            self.y.store(y, Ordering::SeqCst);
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn generator(cursor: &Arc<RecordingCursor>) -> MotionGenerator {
        let generator = MotionGenerator::new(
            Arc::clone(cursor) as Arc<dyn CursorAdapter>,
            &MotionConfig {
                initial_velocity_px_per_ms: 2.0,
                tick_ms: 1,
                autostart: false,
            },
        );
        generator.state().set_track(100, 1920);
        generator
    }

    #[test]
    fn offset_wraps_at_track_width() {
        let offset = track_offset(Duration::from_millis(1000), 2.0, 1920).unwrap();
        assert_eq!(offset, 2000 % 1920);
    }

    #[test]
    fn empty_track_writes_nothing() {
        assert_eq!(track_offset(Duration::from_millis(10), 1.0, 0), None);
        assert_eq!(track_offset(Duration::from_millis(10), 1.0, -5), None);
    }

    #[test]
    fn cursor_x_adds_origin() {
        let state = MotionState::new(0.0);
        state.set_track(300, 800);
        assert_eq!(state.cursor_x(Duration::from_secs(3)), Some(300));
    }

    proptest! {
        #[test]
        fn offset_stays_on_track(
            elapsed_ms in 0u64..10_000_000,
            velocity in 0.0f32..1000.0,
            width in 1i32..10_000,
        ) {
            let offset = track_offset(Duration::from_millis(elapsed_ms), velocity, width).unwrap();
            prop_assert!(offset >= 0 && offset < width);
        }
    }

    #[test]
    fn velocity_never_goes_negative() {
        let state = MotionState::new(1.0);
        for _ in 0..10_000 {
            state.slow_down();
        }
        assert!(state.velocity() >= 0.0);

        state.set_velocity(-3.0);
        assert_eq!(state.velocity(), 0.0);
        state.set_velocity(f32::NAN);
        assert_eq!(state.velocity(), 0.0);
    }

    #[test]
    fn speed_up_scales_by_step() {
        let state = MotionState::new(1.0);
        let v = state.speed_up();
        assert!((v - 1.1).abs() < 1e-6);
        let v = state.slow_down();
        assert!((v - 1.0).abs() < 1e-6);
    }

    #[test]
    fn moves_the_cursor_while_running() {
        let cursor = Arc::new(RecordingCursor::default());
        cursor.y.store(42, Ordering::SeqCst);
        let mut generator = generator(&cursor);

        generator.start().unwrap();
        thread::sleep(Duration::from_millis(30));
        generator.stop();

        assert!(cursor.writes.load(Ordering::SeqCst) > 0);
        let (x, y) = cursor.cursor_position();
        assert!((100..100 + 1920).contains(&x));
        assert_eq!(y, 42, "vertical position is preserved");
    }

    #[test]
    fn stop_joins_before_returning() {
        let cursor = Arc::new(RecordingCursor::default());
        let mut generator = generator(&cursor);

        generator.start().unwrap();
        thread::sleep(Duration::from_millis(20));
        generator.stop();

        let first = (cursor.cursor_position(), cursor.writes.load(Ordering::SeqCst));
        thread::sleep(Duration::from_millis(50));
        let second = (cursor.cursor_position(), cursor.writes.load(Ordering::SeqCst));
        assert_eq!(first, second);
    }

    #[test]
    fn double_start_runs_one_thread() {
        let cursor = Arc::new(RecordingCursor::default());
        let mut generator = generator(&cursor);

        generator.start().unwrap();
        generator.start().unwrap();
        assert!(generator.is_running());
        thread::sleep(Duration::from_millis(10));
        generator.stop();
        assert!(!generator.is_running());

        // A leaked second thread would keep writing after stop.
        let writes = cursor.writes.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(writes, cursor.writes.load(Ordering::SeqCst));
    }

    #[test]
    fn double_stop_is_safe() {
        let cursor = Arc::new(RecordingCursor::default());
        let mut generator = generator(&cursor);

        generator.stop();
        generator.start().unwrap();
        generator.stop();
        generator.stop();
        assert!(!generator.is_running());
    }

    #[test]
    fn restart_keeps_time_origin() {
        let cursor = Arc::new(RecordingCursor::default());
        let mut generator = generator(&cursor);
        let origin = generator.state().start();

        generator.start().unwrap();
        generator.stop();
        generator.start().unwrap();
        generator.stop();

        assert_eq!(generator.state().start(), origin);
    }
}
