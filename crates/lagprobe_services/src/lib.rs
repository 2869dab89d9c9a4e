//! Lagprobe Services Layer
//!
//! Settings, logging and input plumbing between the host window and the
//! probe core.

pub mod input;
pub mod logging;
pub mod settings;

pub use settings::{ProbeSettings, SettingsError};
