//! Cloneable front door to the app loop.

use tokio::sync::{mpsc, oneshot, watch};

use super::messages::{AppMessage, LifecycleEvent, NavigationCommand};
use super::AppSnapshot;
use crate::domain::ConnectivityStatus;
use crate::error::{WaypointError, WaypointResult};
use crate::navigation::{RouteId, RouteToken};

/// Serializes host calls onto the app loop.
///
/// Every method enqueues a message and returns; the effect happens when the
/// loop reaches it. Fails with [`WaypointError::LoopStopped`] once the loop
/// has exited.
#[derive(Debug, Clone)]
pub struct AppHandle {
    message_tx: mpsc::UnboundedSender<AppMessage>,
    loading: watch::Receiver<bool>,
    path: watch::Receiver<Vec<RouteToken>>,
}

impl AppHandle {
    pub(super) fn new(
        message_tx: mpsc::UnboundedSender<AppMessage>,
        loading: watch::Receiver<bool>,
        path: watch::Receiver<Vec<RouteToken>>,
    ) -> Self {
        Self {
            message_tx,
            loading,
            path,
        }
    }

    pub fn send(&self, message: AppMessage) -> WaypointResult<()> {
        self.message_tx
            .send(message)
            .map_err(|_| WaypointError::LoopStopped)
    }

    fn lifecycle(&self, event: LifecycleEvent) -> WaypointResult<()> {
        self.send(AppMessage::Lifecycle(event))
    }

    fn navigate(&self, command: NavigationCommand) -> WaypointResult<()> {
        self.send(AppMessage::Navigate(command))
    }

    pub fn app_launched(&self) -> WaypointResult<()> {
        self.lifecycle(LifecycleEvent::AppLaunched)
    }

    pub fn login_succeeded(&self) -> WaypointResult<()> {
        self.lifecycle(LifecycleEvent::LoginSucceeded)
    }

    pub fn profile_completed(&self) -> WaypointResult<()> {
        self.lifecycle(LifecycleEvent::ProfileCompleted)
    }

    pub fn token_restored(&self) -> WaypointResult<()> {
        self.lifecycle(LifecycleEvent::TokenRestored)
    }

    pub fn permissions_completed(&self) -> WaypointResult<()> {
        self.lifecycle(LifecycleEvent::PermissionsCompleted)
    }

    pub fn permissions_reset(&self) -> WaypointResult<()> {
        self.lifecycle(LifecycleEvent::PermissionsReset)
    }

    pub fn acknowledge_previous_login(&self) -> WaypointResult<()> {
        self.lifecycle(LifecycleEvent::PreviousLoginAcknowledged)
    }

    /// Log out and wait for the outcome.
    ///
    /// `Ok(false)` means the wipe failed and nothing changed; the caller may
    /// retry.
    pub async fn logout(&self) -> WaypointResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.lifecycle(LifecycleEvent::LogoutRequested { reply: Some(reply) })?;
        rx.await.map_err(|_| WaypointError::LoopStopped)
    }

    pub fn push(&self, route: RouteToken) -> WaypointResult<()> {
        self.navigate(NavigationCommand::Push(route))
    }

    pub fn pop(&self) -> WaypointResult<()> {
        self.navigate(NavigationCommand::Pop)
    }

    pub fn pop_multiple(&self, count: usize) -> WaypointResult<()> {
        self.navigate(NavigationCommand::PopMultiple(count))
    }

    pub fn reset_navigation(&self) -> WaypointResult<()> {
        self.navigate(NavigationCommand::Reset)
    }

    /// Feed a raw status from a host-owned monitor.
    pub fn report_connectivity(&self, status: ConnectivityStatus) -> WaypointResult<()> {
        self.send(AppMessage::ConnectivityChanged(status))
    }

    pub async fn snapshot(&self) -> WaypointResult<AppSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(AppMessage::Snapshot(reply))?;
        rx.await.map_err(|_| WaypointError::LoopStopped)
    }

    pub fn shutdown(&self) -> WaypointResult<()> {
        self.send(AppMessage::Shutdown)
    }

    /// Whether a logout is in progress.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn loading_watch(&self) -> watch::Receiver<bool> {
        self.loading.clone()
    }

    /// Current navigation path, bottom first.
    pub fn path(&self) -> Vec<RouteId> {
        self.path.borrow().iter().map(|r| r.id().clone()).collect()
    }

    /// Observe the navigation path.
    pub fn path_watch(&self) -> watch::Receiver<Vec<RouteToken>> {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> (AppHandle, mpsc::UnboundedReceiver<AppMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (_, loading) = watch::channel(false);
        let (_, path) = watch::channel(Vec::new());
        (AppHandle::new(tx, loading, path), rx)
    }

    #[test]
    fn test_calls_enqueue_messages() {
        let (handle, mut rx) = handle();

        handle.login_succeeded().unwrap();
        handle.push(RouteToken::named("a")).unwrap();
        handle.pop_multiple(3).unwrap();
        handle.shutdown().unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            AppMessage::Lifecycle(LifecycleEvent::LoginSucceeded)
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppMessage::Navigate(NavigationCommand::Push(_))
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppMessage::Navigate(NavigationCommand::PopMultiple(3))
        ));
        assert!(matches!(rx.try_recv().unwrap(), AppMessage::Shutdown));
    }

    #[tokio::test]
    async fn test_stopped_loop_reports_error() {
        let (handle, rx) = handle();
        drop(rx);

        assert!(matches!(handle.app_launched(), Err(WaypointError::LoopStopped)));
        assert!(matches!(handle.logout().await, Err(WaypointError::LoopStopped)));
        assert!(matches!(handle.snapshot().await, Err(WaypointError::LoopStopped)));
    }

    #[tokio::test]
    async fn test_logout_reply_dropped_is_loop_stopped() {
        let (handle, mut rx) = handle();

        let responder = tokio::spawn(async move {
            // Receive the request and drop it without replying.
            let _ = rx.recv().await;
        });

        assert!(matches!(handle.logout().await, Err(WaypointError::LoopStopped)));
        responder.await.unwrap();
    }
}
