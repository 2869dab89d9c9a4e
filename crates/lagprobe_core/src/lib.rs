//! Lagprobe Core
//!
//! Contains the input-to-photon probe itself:
//! - Free-running cursor motion generator
//! - Once-per-frame sampling of pointer and display state
//! - Presentation profiles and their expected latency windows
//! - Overlay of frame-offset reference lines
//!
//! Everything host-specific (windows, GPU surfaces, OS cursor calls) is
//! reached through the traits in [`cursor`], [`presentation`] and
//! [`overlay`].

pub mod cursor;
pub mod error;
pub mod latency;
pub mod motion;
pub mod overlay;
pub mod presentation;
pub mod probe;
pub mod profile;
pub mod sampler;
pub mod status;
pub mod time;

pub use cursor::CursorAdapter;
pub use error::{ProbeError, ProbeResult};
pub use presentation::{DisplayMode, Presentation};
pub use probe::{Command, Probe};
pub use profile::{IdealWindow, ProfileKind};

/// Probe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
