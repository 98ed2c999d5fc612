//! Abstraction over the plotting surface that feeds events and redraws.

use std::cell::Cell;

/// The toolkit-side surface the manager is attached to.
///
/// The manager only ever holds a weak handle, so the surface must outlive it;
/// once the surface is dropped every event entry point reports
/// [`DispatchError::Detached`](super::DispatchError::Detached).
pub trait HostSurface {
    /// Schedules a repaint. Must be cheap and idempotent.
    fn request_redraw(&self);
}

/// Host that only counts redraw requests. Useful for headless replay.
#[derive(Debug, Default)]
pub struct RedrawCounter {
    count: Cell<usize>,
}

impl RedrawCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl HostSurface for RedrawCounter {
    fn request_redraw(&self) {
        self.count.set(self.count.get() + 1);
    }
}
