//! Debouncing of the boolean connectivity value.
//!
//! A changed value must hold for the whole window before it becomes ground
//! truth. Flapping back to the settled value inside the window cancels the
//! pending change outright.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::app::AppMessage;
use crate::timer::TimerSlot;

/// Default debounce window.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Debounces the connected/disconnected value.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    settled: bool,
    pending: Option<bool>,
    timer: TimerSlot,
}

impl Debouncer {
    /// Create a debouncer whose ground truth starts as `initial`.
    pub fn new(window: Duration, initial: bool) -> Self {
        Self {
            window,
            settled: initial,
            pending: None,
            timer: TimerSlot::new(),
        }
    }

    /// Feed a raw value.
    pub fn on_value(&mut self, connected: bool, message_tx: &mpsc::UnboundedSender<AppMessage>) {
        if self.pending.unwrap_or(self.settled) == connected {
            return;
        }

        if connected == self.settled {
            debug!(connected, "Connectivity flapped back inside debounce window");
            self.pending = None;
            self.timer.invalidate();
            return;
        }

        self.pending = Some(connected);
        self.timer.arm(message_tx, self.window, |generation| {
            AppMessage::DebounceElapsed { generation }
        });
    }

    /// Handle the window elapsing.
    ///
    /// Returns the new ground truth if it changed.
    pub fn on_elapsed(&mut self, generation: u64) -> Option<bool> {
        if !self.timer.fire(generation) {
            debug!(generation, "Ignoring stale debounce timer");
            return None;
        }
        let value = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value;
        Some(value)
    }

    /// Current ground truth.
    pub fn settled(&self) -> bool {
        self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
