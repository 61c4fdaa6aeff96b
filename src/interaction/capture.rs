//! Scoped pointer capture for the duration of a gesture.
//!
//! While a gesture is live the host usually listens for pointer events
//! outside the calendar (moves and releases anywhere on the window). The host
//! acquires that subscription at pointer-down and wraps its teardown in a
//! [`CaptureGuard`]; the controller keeps the guard inside its active state,
//! so leaving the gesture by any path releases the listeners exactly once.

use std::fmt;

#[must_use = "dropping the guard releases the pointer capture immediately"]
pub struct CaptureGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release (hosts without global listeners, tests)
    pub fn detached() -> Self {
        Self { release: None }
    }

    pub fn is_held(&self) -> bool {
        self.release.is_some()
    }

    /// Release now instead of waiting for drop
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("held", &self.is_held())
            .finish()
    }
}
