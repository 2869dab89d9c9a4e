use thiserror::Error;

/// Errors raised by the probe.
///
/// Every variant except [`ProbeError::MotionThread`] is a startup failure:
/// the probe cannot run without control over the system cursor.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no cursor backend supports this platform (supported: {supported})")]
    UnsupportedPlatform { supported: String },

    #[error("ambiguous platform: cursor backends {matched:?} all claim this host")]
    AmbiguousPlatform { matched: Vec<&'static str> },

    #[error("cursor backend '{backend}' cannot move the pointer: {reason}")]
    CursorControlUnavailable { backend: &'static str, reason: String },

    #[error("failed to spawn motion thread")]
    MotionThread(#[from] std::io::Error),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

impl ProbeError {
    pub fn cursor_unavailable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::CursorControlUnavailable {
            backend,
            reason: reason.into(),
        }
    }
}
