//! Messages processed by the app event loop.
//!
//! Every inbound event, whether from the host, a monitor, or a timer
//! firing, arrives as an [`AppMessage`] on one channel and is handled to
//! completion before the next one is read.

use tokio::sync::oneshot;

use crate::domain::ConnectivityStatus;
use crate::error::StoreError;
use crate::navigation::RouteToken;

use super::AppSnapshot;

/// Fact-changing events reported by the host.
#[derive(Debug)]
pub enum LifecycleEvent {
    /// The first-launch flow finished; mark the app as launched.
    AppLaunched,
    /// The host stored a token after a successful login.
    LoginSucceeded,
    /// The host cleared the profile-completion requirement.
    ProfileCompleted,
    /// A token was restored from a backup or another device.
    TokenRestored,
    PermissionsCompleted,
    PermissionsReset,
    /// The user confirmed the session found on the old-login screen.
    PreviousLoginAcknowledged,
    /// Log the user out. The reply carries whether the wipe succeeded.
    LogoutRequested {
        reply: Option<oneshot::Sender<bool>>,
    },
}

/// User-initiated navigation.
#[derive(Debug)]
pub enum NavigationCommand {
    Push(RouteToken),
    Pop,
    PopMultiple(usize),
    Reset,
}

/// Messages for the app event loop.
#[derive(Debug)]
pub enum AppMessage {
    Lifecycle(LifecycleEvent),
    Navigate(NavigationCommand),
    /// Raw status from a connectivity monitor.
    ConnectivityChanged(ConnectivityStatus),
    /// The connectivity debounce window elapsed.
    DebounceElapsed { generation: u64 },
    /// The overlay show delay elapsed.
    OverlayDelayElapsed { generation: u64 },
    /// The root-swap settle delay elapsed.
    SettleElapsed { generation: u64 },
    /// The user-data wipe started by a logout finished.
    LogoutCompleted {
        result: Result<(), StoreError>,
        reply: Option<oneshot::Sender<bool>>,
    },
    /// Request a state snapshot.
    Snapshot(oneshot::Sender<AppSnapshot>),
    /// Stop the loop.
    Shutdown,
}

impl AppMessage {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppMessage::Lifecycle(_) => "lifecycle",
            AppMessage::Navigate(_) => "navigate",
            AppMessage::ConnectivityChanged(_) => "connectivity_changed",
            AppMessage::DebounceElapsed { .. } => "debounce_elapsed",
            AppMessage::OverlayDelayElapsed { .. } => "overlay_delay_elapsed",
            AppMessage::SettleElapsed { .. } => "settle_elapsed",
            AppMessage::LogoutCompleted { .. } => "logout_completed",
            AppMessage::Snapshot(_) => "snapshot",
            AppMessage::Shutdown => "shutdown",
        }
    }
}
