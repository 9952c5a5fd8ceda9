//! Root-view coordinator.
//!
//! Sits between the state manager and the render host. Screen changes are
//! held for a settle delay before the root is swapped, so a burst of
//! transitions (Splash immediately followed by Home at cold start) becomes a
//! single swap. The coordinator also owns the navigation stack and relays
//! overlay visibility, which never touches the root.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::messages::{AppMessage, NavigationCommand};
use crate::domain::Screen;
use crate::navigation::{NavigationStack, RouteToken};
use crate::timer::TimerSlot;
use crate::traits::{RenderHost, RootView, ScreenViews};

/// Default settle delay before a root swap.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Drives the render host from screen, overlay, and navigation changes.
pub struct Coordinator {
    navigation: NavigationStack,
    host: Box<dyn RenderHost>,
    views: Arc<dyn ScreenViews>,
    settle_timer: TimerSlot,
    settle_delay: Duration,
    pending: Option<Screen>,
    rendered: Option<Screen>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl Coordinator {
    pub fn new(
        host: Box<dyn RenderHost>,
        views: Arc<dyn ScreenViews>,
        settle_delay: Duration,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            navigation: NavigationStack::new(),
            host,
            views,
            settle_timer: TimerSlot::new(),
            settle_delay,
            pending: None,
            rendered: None,
            message_tx,
        }
    }

    /// A new screen was published. (Re)start the settle delay.
    pub fn on_screen_changed(&mut self, screen: Screen) {
        debug!(screen = %screen, delay = ?self.settle_delay, "Screen pending settle");
        self.pending = Some(screen);
        self.settle_timer
            .arm(&self.message_tx, self.settle_delay, |generation| {
                AppMessage::SettleElapsed { generation }
            });
    }

    /// The settle delay elapsed.
    ///
    /// Returns the screen presented as root, if a swap happened.
    pub fn on_settle_elapsed(&mut self, generation: u64) -> Option<Screen> {
        if !self.settle_timer.fire(generation) {
            debug!(generation, "Ignoring stale settle timer");
            return None;
        }
        let screen = self.pending.take()?;

        if screen == Screen::Splash && self.navigation.reset() {
            debug!("Settled on splash; navigation history cleared");
            self.sync_path();
        }

        if self.rendered == Some(screen) {
            debug!(screen = %screen, "Settled on the screen already shown");
            return None;
        }

        info!(from = ?self.rendered, to = %screen, "Swapping root view");
        self.rendered = Some(screen);
        self.host
            .present_root(RootView::new(screen, Arc::clone(&self.views)));
        Some(screen)
    }

    /// Show or hide the connectivity overlay.
    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.host.set_overlay_visible(visible);
    }

    /// Apply a navigation command. Returns true if the stack changed.
    pub fn navigate(&mut self, command: NavigationCommand) -> bool {
        let changed = match command {
            NavigationCommand::Push(route) => self.navigation.push(route),
            NavigationCommand::Pop => self.navigation.pop(),
            NavigationCommand::PopMultiple(count) => self.navigation.pop_multiple(count),
            NavigationCommand::Reset => self.navigation.reset(),
        };
        if changed {
            self.sync_path();
        }
        changed
    }

    pub fn rendered_screen(&self) -> Option<Screen> {
        self.rendered
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    /// Observe the navigation path.
    pub fn path_watch(&self) -> watch::Receiver<Vec<RouteToken>> {
        self.navigation.subscribe()
    }

    fn sync_path(&mut self) {
        let path = self.navigation.snapshot();
        self.host.sync_path(&path);
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("navigation", &self.navigation)
            .field("pending", &self.pending)
            .field("rendered", &self.rendered)
            .finish_non_exhaustive()
    }
}
