//! Last successfully read cursor position.

use std::sync::atomic::{AtomicI32, Ordering};

/// Remembers the last good pointer read so a failed OS query does not warp
/// the cursor to the screen origin.
#[derive(Debug)]
pub struct LastKnownPosition {
    x: AtomicI32,
    y: AtomicI32,
}

impl LastKnownPosition {
    pub fn new((x, y): (i32, i32)) -> Self {
        Self {
            x: AtomicI32::new(x),
            y: AtomicI32::new(y),
        }
    }

    /// Store `fresh` if the read succeeded; return the best known position.
    pub fn resolve(&self, fresh: Option<(i32, i32)>) -> (i32, i32) {
        match fresh {
            Some((x, y)) => {
                self.x.store(x, Ordering::Relaxed);
                self.y.store(y, Ordering::Relaxed);
                (x, y)
            }
            None => (self.x.load(Ordering::Relaxed), self.y.load(Ordering::Relaxed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_read_keeps_previous_position() {
        let last = LastKnownPosition::new((10, 20));
        assert_eq!(last.resolve(Some((300, 400))), (300, 400));
        assert_eq!(last.resolve(None), (300, 400));
    }

    #[test]
    fn failure_before_any_read_uses_connect_position() {
        let last = LastKnownPosition::new((640, 360));
        assert_eq!(last.resolve(None), (640, 360));
    }
}
