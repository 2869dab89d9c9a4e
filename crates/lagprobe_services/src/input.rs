//! Keyboard bindings and per-frame input snapshot.
//!
//! Window events arrive at any time between frames. `FrameInput` collects
//! them and only exposes what was pending when the frame began, so every
//! reader in one frame sees the same pointer position.

use lagprobe_core::probe::Command;
use lagprobe_core::profile::ProfileKind;
use lagprobe_core::sampler::PointerSource;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Map a physical key to a probe command.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::ArrowUp => Command::SpeedUp,
        KeyCode::ArrowDown => Command::SlowDown,
        KeyCode::ArrowRight => Command::MoreLatency,
        KeyCode::ArrowLeft => Command::LessLatency,
        KeyCode::Tab => Command::CycleDisplayMode,
        KeyCode::Digit1 | KeyCode::Numpad1 => return profile_slot(1),
        KeyCode::Digit2 | KeyCode::Numpad2 => return profile_slot(2),
        KeyCode::Digit3 | KeyCode::Numpad3 => return profile_slot(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => return profile_slot(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => return profile_slot(5),
        KeyCode::Space => Command::Start,
        KeyCode::Escape => Command::Stop,
        _ => return None,
    };
    Some(command)
}

fn profile_slot(slot: u8) -> Option<Command> {
    ProfileKind::from_slot(slot).map(Command::SelectProfile)
}

#[derive(Debug, Default)]
pub struct FrameInput {
    pending_commands: Vec<Command>,
    latest_pointer: Option<(f32, f32)>,

    frame_commands: Vec<Command>,
    frame_pointer: (f32, f32),
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event. Held-key repeats are dropped, so one press is one
    /// command.
    pub fn key_event(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        if let PhysicalKey::Code(code) = event.physical_key {
            self.key_pressed(code);
        }
    }

    pub fn key_pressed(&mut self, code: KeyCode) {
        if let Some(command) = command_for_key(code) {
            self.pending_commands.push(command);
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.latest_pointer = Some((x, y));
    }

    /// Latch pending events as this frame's input.
    pub fn begin_frame(&mut self) {
        if let Some(pointer) = self.latest_pointer.take() {
            self.frame_pointer = pointer;
        }
        self.frame_commands.clear();
        self.frame_commands.append(&mut self.pending_commands);
    }

    /// Commands pressed before this frame began, in arrival order.
    pub fn take_pressed(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.frame_commands)
    }
}

impl PointerSource for FrameInput {
    fn frame_cached_pointer_position(&self) -> (f32, f32) {
        self.frame_pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_cover_every_command() {
        assert_eq!(command_for_key(KeyCode::ArrowUp), Some(Command::SpeedUp));
        assert_eq!(command_for_key(KeyCode::ArrowDown), Some(Command::SlowDown));
        assert_eq!(command_for_key(KeyCode::ArrowRight), Some(Command::MoreLatency));
        assert_eq!(command_for_key(KeyCode::ArrowLeft), Some(Command::LessLatency));
        assert_eq!(command_for_key(KeyCode::Tab), Some(Command::CycleDisplayMode));
        assert_eq!(command_for_key(KeyCode::Space), Some(Command::Start));
        assert_eq!(command_for_key(KeyCode::Escape), Some(Command::Stop));
        assert_eq!(
            command_for_key(KeyCode::Digit3),
            Some(Command::SelectProfile(ProfileKind::FreeCappedRefresh))
        );
        assert_eq!(
            command_for_key(KeyCode::Numpad5),
            Some(Command::SelectProfile(ProfileKind::FreeUncapped))
        );
        assert_eq!(command_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn pointer_is_latched_at_frame_start() {
        let mut input = FrameInput::new();
        input.pointer_moved(10.0, 20.0);
        input.begin_frame();
        input.pointer_moved(30.0, 40.0);

        assert_eq!(input.frame_cached_pointer_position(), (10.0, 20.0));

        input.begin_frame();
        assert_eq!(input.frame_cached_pointer_position(), (30.0, 40.0));
    }

    #[test]
    fn pointer_persists_without_new_motion() {
        let mut input = FrameInput::new();
        input.pointer_moved(5.0, 6.0);
        input.begin_frame();
        input.begin_frame();
        assert_eq!(input.frame_cached_pointer_position(), (5.0, 6.0));
    }

    #[test]
    fn commands_belong_to_the_frame_they_preceded() {
        let mut input = FrameInput::new();
        input.key_pressed(KeyCode::Digit1);
        input.key_pressed(KeyCode::ArrowUp);
        input.begin_frame();
        input.key_pressed(KeyCode::Space);

        assert_eq!(
            input.take_pressed(),
            vec![Command::SelectProfile(ProfileKind::VsyncQueue2), Command::SpeedUp]
        );
        assert!(input.take_pressed().is_empty());

        input.begin_frame();
        assert_eq!(input.take_pressed(), vec![Command::Start]);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut input = FrameInput::new();
        input.key_pressed(KeyCode::KeyZ);
        input.begin_frame();
        assert!(input.take_pressed().is_empty());
    }
}
