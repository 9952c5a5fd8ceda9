//! Connectivity overlay hysteresis.
//!
//! Three stages, each feeding the next:
//!
//! ```text
//! raw status ──▶ StatusFilter ──▶ Debouncer (500ms) ──▶ overlay policy
//!                (repeats dropped)  (ground truth)       show after 2000ms,
//!                                                        hide immediately
//! ```
//!
//! The overlay timer shares the generation discipline of every other timer:
//! each ground-truth edge bumps the generation, so a disconnect timer armed
//! before a reconnect can never raise the overlay afterwards.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::debouncer::{Debouncer, DEBOUNCE_WINDOW};
use super::filter::StatusFilter;
use crate::app::AppMessage;
use crate::domain::ConnectivityStatus;
use crate::timer::TimerSlot;

/// Default delay before the overlay is shown.
pub const OVERLAY_SHOW_DELAY: Duration = Duration::from_millis(2000);

/// Turns raw connectivity edges into an overlay visibility flag.
#[derive(Debug)]
pub struct ConnectivityHysteresis {
    filter: StatusFilter,
    debouncer: Debouncer,
    overlay_timer: TimerSlot,
    show_delay: Duration,
    overlay_visible: bool,
    message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl ConnectivityHysteresis {
    /// Create with the default 500ms debounce and 2000ms show delay.
    pub fn new(message_tx: mpsc::UnboundedSender<AppMessage>) -> Self {
        Self::with_timing(message_tx, DEBOUNCE_WINDOW, OVERLAY_SHOW_DELAY)
    }

    pub fn with_timing(
        message_tx: mpsc::UnboundedSender<AppMessage>,
        debounce_window: Duration,
        show_delay: Duration,
    ) -> Self {
        Self {
            filter: StatusFilter::new(),
            // No signal yet reads as connected, keeping the overlay hidden.
            debouncer: Debouncer::new(debounce_window, true),
            overlay_timer: TimerSlot::new(),
            show_delay,
            overlay_visible: false,
            message_tx,
        }
    }

    /// Feed a raw status.
    pub fn on_status(&mut self, status: ConnectivityStatus) {
        let Some(status) = self.filter.observe(status) else {
            return;
        };
        debug!(?status, "Raw connectivity transition");
        self.debouncer.on_value(status.is_connected(), &self.message_tx);
    }

    /// Handle the debounce window elapsing.
    ///
    /// Returns the new overlay visibility if it changed.
    pub fn on_debounce_elapsed(&mut self, generation: u64) -> Option<bool> {
        let connected = self.debouncer.on_elapsed(generation)?;
        self.on_ground_truth(connected)
    }

    /// Handle the overlay show delay elapsing.
    ///
    /// Returns `Some(true)` if the overlay should now be shown.
    pub fn on_overlay_delay_elapsed(&mut self, generation: u64) -> Option<bool> {
        if !self.overlay_timer.fire(generation) {
            debug!(generation, "Ignoring stale overlay timer");
            return None;
        }
        if self.debouncer.settled() || self.overlay_visible {
            return None;
        }
        info!("Connection still down; showing connectivity overlay");
        self.overlay_visible = true;
        Some(true)
    }

    fn on_ground_truth(&mut self, connected: bool) -> Option<bool> {
        if connected {
            self.overlay_timer.invalidate();
            if self.overlay_visible {
                info!("Connection restored; hiding connectivity overlay");
                self.overlay_visible = false;
                return Some(false);
            }
            return None;
        }

        debug!(delay = ?self.show_delay, "Connection lost; arming overlay timer");
        self.overlay_timer
            .arm(&self.message_tx, self.show_delay, |generation| {
                AppMessage::OverlayDelayElapsed { generation }
            });
        None
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Debounced connectivity.
    pub fn is_connected(&self) -> bool {
        self.debouncer.settled()
    }
}
