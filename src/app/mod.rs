//! Composition root and event loop.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`AppMessage`] - Messages processed by the loop
//! - [`Coordinator`] - Root swaps, overlay relay, navigation
//! - [`AppHandle`] - Cloneable front door for the host
//! - [`AppSnapshot`] - Point-in-time view of the loop's state
//!
//! Every component is owned by one task. Host calls, monitor edges, and
//! timer firings are all messages on one channel, handled one at a time, so
//! no two mutations interleave and no component needs a lock.
//!
//! The logout wipe is the one slow store call. It runs in its own task and
//! reports back with [`AppMessage::LogoutCompleted`]; lifecycle events that
//! arrive meanwhile are held and replayed afterwards, while timers,
//! connectivity, and navigation keep flowing.

mod coordinator;
mod handle;
mod messages;

pub use coordinator::{Coordinator, SETTLE_DELAY};
pub use handle::AppHandle;
pub use messages::{AppMessage, LifecycleEvent, NavigationCommand};

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::adapters::{FileKeyValueStore, FileSecureStore, HttpProbeMonitor};
use crate::config::WaypointConfig;
use crate::connectivity::{spawn_monitor, ConnectivityHysteresis};
use crate::domain::Screen;
use crate::error::WaypointResult;
use crate::facts::FactSource;
use crate::manager::AppStateManager;
use crate::navigation::RouteId;
use crate::traits::{ConnectivityProbe, PermissionChecker, RenderHost, ScreenViews};

/// Point-in-time view of the loop's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Screen the manager currently decides on.
    pub screen: Screen,
    /// Screen last presented as root; `None` before the first swap.
    pub rendered_screen: Option<Screen>,
    pub overlay_visible: bool,
    /// Debounced connectivity.
    pub connected: bool,
    pub path: Vec<RouteId>,
    pub is_loading: bool,
}

/// The app: state manager, coordinator, and connectivity hysteresis.
pub struct App {
    config: WaypointConfig,
    manager: AppStateManager,
    coordinator: Coordinator,
    hysteresis: ConnectivityHysteresis,
    screen_rx: mpsc::UnboundedReceiver<Screen>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    message_rx: mpsc::UnboundedReceiver<AppMessage>,
    loading: watch::Receiver<bool>,
    monitor: Option<JoinHandle<()>>,
    /// Lifecycle events held back while a logout wipe is in flight.
    deferred: VecDeque<LifecycleEvent>,
    logout_task: Option<JoinHandle<()>>,
}

impl App {
    /// Build the app and schedule the initial root.
    pub async fn new(
        config: WaypointConfig,
        facts: FactSource,
        host: impl RenderHost + 'static,
        views: Arc<dyn ScreenViews>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        let mut manager = AppStateManager::new(facts, config.permission_routing).await;
        let screen_rx = manager.subscribe();
        let loading = manager.loading_watch();

        let mut coordinator = Coordinator::new(
            Box::new(host),
            views,
            config.settle_delay,
            message_tx.clone(),
        );
        // The first root goes through the settle delay too, so a refresh
        // right after launch replaces it before anything is shown.
        coordinator.on_screen_changed(manager.current());

        let hysteresis = ConnectivityHysteresis::with_timing(
            message_tx.clone(),
            config.debounce_window,
            config.overlay_show_delay,
        );

        info!(screen = %manager.current(), "App created");

        Self {
            config,
            manager,
            coordinator,
            hysteresis,
            screen_rx,
            message_tx,
            message_rx,
            loading,
            monitor: None,
            deferred: VecDeque::new(),
            logout_task: None,
        }
    }

    /// Build the app on the file-backed stores under the configured data dir.
    pub async fn with_file_stores(
        config: WaypointConfig,
        permissions: Arc<dyn PermissionChecker>,
        host: impl RenderHost + 'static,
        views: Arc<dyn ScreenViews>,
    ) -> WaypointResult<Self> {
        let dir = config.data_dir.as_deref();
        let facts = FactSource::new(
            Arc::new(FileKeyValueStore::new(dir)?),
            Arc::new(FileSecureStore::new(dir)?),
            permissions,
        );
        Ok(Self::new(config, facts, host, views).await)
    }

    /// Get a handle for sending events to the loop.
    pub fn handle(&self) -> AppHandle {
        AppHandle::new(
            self.message_tx.clone(),
            self.loading.clone(),
            self.coordinator.path_watch(),
        )
    }

    /// Start polling `probe` at the configured interval.
    ///
    /// Replaces any monitor already running.
    pub fn start_monitor(&mut self, probe: Arc<dyn ConnectivityProbe>) {
        if let Some(previous) = self.monitor.take() {
            previous.abort();
        }
        self.monitor = Some(spawn_monitor(
            probe,
            self.config.probe_interval,
            self.message_tx.clone(),
        ));
    }

    /// Start the HTTP probe if a probe URL is configured.
    ///
    /// Returns true if a monitor was started.
    pub fn start_http_monitor(&mut self) -> WaypointResult<bool> {
        let Some(url) = self.config.probe_url.clone() else {
            return Ok(false);
        };
        let probe = HttpProbeMonitor::new(url, self.config.probe_timeout)?;
        self.start_monitor(Arc::new(probe));
        Ok(true)
    }

    /// Run until [`AppHandle::shutdown`] is called.
    pub async fn run(mut self) {
        if self.monitor.is_none() {
            if let Err(e) = self.start_http_monitor() {
                warn!(error = %e, "Connectivity probe disabled");
            }
        }

        info!("App loop started");
        while let Some(message) = self.message_rx.recv().await {
            if !self.handle_message(message).await {
                break;
            }
        }

        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }
        if let Some(task) = self.logout_task.take() {
            task.abort();
        }
        info!("App loop stopped");
    }

    /// Handle one message to completion. Returns false on shutdown.
    pub async fn handle_message(&mut self, message: AppMessage) -> bool {
        debug!(kind = message.kind(), "Handling message");

        match message {
            AppMessage::Lifecycle(event) => self.handle_lifecycle(event).await,
            AppMessage::Navigate(command) => {
                self.coordinator.navigate(command);
            }
            AppMessage::ConnectivityChanged(status) => self.hysteresis.on_status(status),
            AppMessage::DebounceElapsed { generation } => {
                if let Some(visible) = self.hysteresis.on_debounce_elapsed(generation) {
                    self.coordinator.set_overlay_visible(visible);
                }
            }
            AppMessage::OverlayDelayElapsed { generation } => {
                if let Some(visible) = self.hysteresis.on_overlay_delay_elapsed(generation) {
                    self.coordinator.set_overlay_visible(visible);
                }
            }
            AppMessage::SettleElapsed { generation } => {
                self.coordinator.on_settle_elapsed(generation);
            }
            AppMessage::LogoutCompleted { result, reply } => {
                self.logout_task = None;
                let ok = self.manager.finish_logout(result).await;
                if let Some(reply) = reply {
                    let _ = reply.send(ok);
                }
                self.replay_deferred().await;
            }
            AppMessage::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            AppMessage::Shutdown => return false,
        }

        // Notifications raised while handling are forwarded in order.
        while let Ok(screen) = self.screen_rx.try_recv() {
            self.coordinator.on_screen_changed(screen);
        }
        true
    }

    async fn handle_lifecycle(&mut self, event: LifecycleEvent) {
        if self.manager.is_loading() {
            debug!(?event, "Logout in flight; deferring lifecycle event");
            self.deferred.push_back(event);
            return;
        }

        match event {
            LifecycleEvent::AppLaunched => self.manager.mark_app_as_launched().await,
            LifecycleEvent::LoginSucceeded => self.manager.handle_successful_login().await,
            LifecycleEvent::ProfileCompleted => self.manager.handle_profile_completion().await,
            LifecycleEvent::TokenRestored => self.manager.handle_token_restoration().await,
            LifecycleEvent::PermissionsCompleted => {
                self.manager.mark_permission_setup_completed().await
            }
            LifecycleEvent::PermissionsReset => self.manager.reset_permission_setup().await,
            LifecycleEvent::PreviousLoginAcknowledged => {
                self.manager.acknowledge_previous_login().await
            }
            LifecycleEvent::LogoutRequested { reply } => self.start_logout(reply),
        }
    }

    /// Spawn the wipe; its result comes back as a `LogoutCompleted` message.
    fn start_logout(&mut self, reply: Option<oneshot::Sender<bool>>) {
        let Some(facts) = self.manager.begin_logout() else {
            if let Some(reply) = reply {
                let _ = reply.send(false);
            }
            return;
        };

        let tx = self.message_tx.clone();
        self.logout_task = Some(tokio::spawn(async move {
            let result = facts.clear_user_data().await;
            let _ = tx.send(AppMessage::LogoutCompleted { result, reply });
        }));
    }

    /// Replay held events in arrival order until one starts another logout.
    async fn replay_deferred(&mut self) {
        while !self.manager.is_loading() {
            let Some(event) = self.deferred.pop_front() else {
                break;
            };
            self.handle_lifecycle(event).await;
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            screen: self.manager.current(),
            rendered_screen: self.coordinator.rendered_screen(),
            overlay_visible: self.hysteresis.overlay_visible(),
            connected: self.hysteresis.is_connected(),
            path: self
                .coordinator
                .navigation()
                .snapshot()
                .iter()
                .map(|route| route.id().clone())
                .collect(),
            is_loading: self.manager.is_loading(),
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("manager", &self.manager)
            .field("coordinator", &self.coordinator)
            .field("hysteresis", &self.hysteresis)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySecureStore, InMemoryStore, RecordingHost, StaticPermissions};
    use crate::domain::{ConnectivityStatus, SecureProfile};
    use crate::facts::{HAS_LAUNCHED_KEY, PERMISSION_COMPLETED_KEY};
    use crate::navigation::RouteToken;
    use crate::traits::HostView;
    use std::time::Duration;

    async fn app(store: InMemoryStore, secure: InMemorySecureStore) -> (App, RecordingHost) {
        let facts = FactSource::new(
            Arc::new(store),
            Arc::new(secure),
            Arc::new(StaticPermissions::none_pending()),
        );
        let log = RecordingHost::new();
        let views: Arc<dyn ScreenViews> = Arc::new(|_: Screen| -> HostView { Box::new(()) });
        let app = App::new(WaypointConfig::default(), facts, log.clone(), views).await;
        (app, log)
    }

    /// Drive the loop by hand: deliver every queued message.
    async fn drain(app: &mut App) {
        while let Ok(message) = app.message_rx.try_recv() {
            app.handle_message(message).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_root_after_settle() {
        let (mut app, log) = app(InMemoryStore::new(), InMemorySecureStore::new()).await;
        assert_eq!(app.snapshot().rendered_screen, None);

        tokio::time::sleep(Duration::from_millis(150)).await;
        drain(&mut app).await;

        assert_eq!(log.roots(), vec![Screen::Splash]);
        assert_eq!(app.snapshot().rendered_screen, Some(Screen::Splash));
    }

    #[tokio::test(start_paused = true)]
    async fn test_launch_right_after_start_coalesces() {
        let store = InMemoryStore::new();
        let secure = InMemorySecureStore::with_profile(SecureProfile::with_token("tok"));
        let (mut app, log) = app(store.clone(), secure).await;
        assert_eq!(app.snapshot().screen, Screen::OldLoginDetection);

        app.handle_message(AppMessage::Lifecycle(LifecycleEvent::PreviousLoginAcknowledged))
            .await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        drain(&mut app).await;

        assert_eq!(log.roots(), vec![Screen::Home]);
        assert_eq!(store.get_bool_sync(HAS_LAUNCHED_KEY), Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlay_routed_to_host() {
        let (mut app, log) = app(InMemoryStore::new(), InMemorySecureStore::new()).await;

        app.handle_message(AppMessage::ConnectivityChanged(ConnectivityStatus::Unsatisfied))
            .await;
        for _ in 0..30 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            drain(&mut app).await;
        }

        assert_eq!(log.overlay_changes(), vec![true]);
        let snapshot = app.snapshot();
        assert!(snapshot.overlay_visible);
        assert!(!snapshot.connected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_reflected_in_snapshot() {
        let (mut app, _log) = app(InMemoryStore::new(), InMemorySecureStore::new()).await;

        app.handle_message(AppMessage::Navigate(NavigationCommand::Push(
            RouteToken::named("settings"),
        )))
        .await;

        assert_eq!(app.snapshot().path, vec![RouteId::new("settings")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lifecycle_events_wait_for_logout_wipe() {
        let store = InMemoryStore::new();
        store.set_bool_sync(HAS_LAUNCHED_KEY, true);
        let secure = InMemorySecureStore::with_profile(SecureProfile::with_token("tok"));
        secure.set_clear_delay(Some(Duration::from_millis(500)));
        let (mut app, _log) = app(store.clone(), secure).await;

        let (reply, done) = oneshot::channel();
        app.handle_message(AppMessage::Lifecycle(LifecycleEvent::LogoutRequested {
            reply: Some(reply),
        }))
        .await;
        app.handle_message(AppMessage::Lifecycle(LifecycleEvent::PermissionsCompleted))
            .await;

        // The loop is free while the wipe runs; the event is only held.
        assert!(app.snapshot().is_loading);
        assert_eq!(app.snapshot().screen, Screen::Home);
        assert!(!store.contains(PERMISSION_COMPLETED_KEY));

        tokio::time::sleep(Duration::from_millis(600)).await;
        drain(&mut app).await;

        assert!(done.await.unwrap());
        let snapshot = app.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.screen, Screen::Login);
        // Replayed after the logout reset, so it sticks.
        assert_eq!(store.get_bool_sync(PERMISSION_COMPLETED_KEY), Some(true));
    }

    #[tokio::test]
    async fn test_shutdown_stops_handling() {
        let (mut app, _log) = app(InMemoryStore::new(), InMemorySecureStore::new()).await;
        assert!(!app.handle_message(AppMessage::Shutdown).await);
    }
}
