//! Cancellable delayed delivery of the latest value
//!
//! A `Debouncer` holds at most one pending task on the tokio runtime. Each
//! `push` cancels the pending task and schedules a new one, so only the last
//! value pushed within a quiet window reaches the sink.

use std::sync::Arc;
use std::time::Duration;

use log::trace;
use tokio::task::JoinHandle;

type Sink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Coalesces rapid pushes into a single delayed call.
///
/// Must be used from within a tokio runtime. Dropping the debouncer cancels
/// any pending call.
pub struct Debouncer<T> {
    window: Duration,
    sink: Sink<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(window: Duration, sink: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            window,
            sink: Arc::new(sink),
            pending: None,
        }
    }

    /// Schedule `value` for delivery after the window, replacing any pending value.
    pub fn push(&mut self, value: T) {
        if self.cancel() {
            trace!("Debounce timer reset");
        }

        let sink = Arc::clone(&self.sink);
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            sink(value);
        }));
    }
}

impl<T> Debouncer<T> {
    /// Cancel the pending call, if any. Returns whether one was cancelled.
    /// Calling it again is a no-op.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .field("pending", &self.is_pending())
            .finish()
    }
}
