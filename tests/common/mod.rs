//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let app = TestAppBuilder::new().launched().signed_in().spawn().await;
//! app.handle.logout().await.unwrap();
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use waypoint::adapters::mock::{InMemorySecureStore, InMemoryStore, RecordingHost, StaticPermissions};
use waypoint::app::{App, AppHandle};
use waypoint::config::WaypointConfig;
use waypoint::domain::{Permission, Screen, SecureProfile};
use waypoint::evaluator::PermissionRouting;
use waypoint::facts::{FactSource, HAS_LAUNCHED_KEY, PERMISSION_COMPLETED_KEY};
use waypoint::traits::{HostView, ScreenViews};

/// Longer than the default settle delay.
pub const SETTLE: Duration = Duration::from_millis(150);

/// A profile holding a valid token.
pub fn test_profile() -> SecureProfile {
    SecureProfile {
        token: Some("test-token-12345".to_string()),
        display_name: Some("Test User".to_string()),
        mobile_number: Some("+15550100".to_string()),
        ..Default::default()
    }
}

/// Views that box the screen itself, so tests can downcast what was built.
pub fn screen_views() -> Arc<dyn ScreenViews> {
    Arc::new(|screen: Screen| -> HostView { Box::new(screen) })
}

/// Builder for a running app over in-memory stores.
#[derive(Default)]
pub struct TestAppBuilder {
    launched: bool,
    profile: Option<SecureProfile>,
    permission_completed: bool,
    pending: Vec<Permission>,
    config: WaypointConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The app has been launched before.
    pub fn launched(mut self) -> Self {
        self.launched = true;
        self
    }

    pub fn signed_in(mut self) -> Self {
        self.profile = Some(test_profile());
        self
    }

    pub fn with_profile(mut self, profile: SecureProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn permission_completed(mut self) -> Self {
        self.permission_completed = true;
        self
    }

    pub fn with_pending(mut self, pending: Vec<Permission>) -> Self {
        self.pending = pending;
        self
    }

    pub fn require_permissions(mut self) -> Self {
        self.config = self
            .config
            .with_permission_routing(PermissionRouting::RequirePermissions);
        self
    }

    pub fn with_config(mut self, config: WaypointConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the app and spawn its loop.
    pub async fn spawn(self) -> TestApp {
        let store = InMemoryStore::new();
        if self.launched {
            store.set_bool_sync(HAS_LAUNCHED_KEY, true);
        }
        if self.permission_completed {
            store.set_bool_sync(PERMISSION_COMPLETED_KEY, true);
        }
        let secure = InMemorySecureStore::new();
        secure.set_profile(self.profile);
        let permissions = StaticPermissions::pending(self.pending);

        let facts = FactSource::new(
            Arc::new(store.clone()),
            Arc::new(secure.clone()),
            Arc::new(permissions.clone()),
        );
        let host = RecordingHost::materializing();
        let app = App::new(self.config, facts, host.clone(), screen_views()).await;
        let handle = app.handle();
        let task = tokio::spawn(app.run());

        TestApp {
            handle,
            host,
            store,
            secure,
            permissions,
            task,
        }
    }
}

/// A running app plus the doubles behind it.
pub struct TestApp {
    pub handle: AppHandle,
    pub host: RecordingHost,
    pub store: InMemoryStore,
    pub secure: InMemorySecureStore,
    pub permissions: StaticPermissions,
    pub task: JoinHandle<()>,
}

impl TestApp {
    /// Wait past the settle delay.
    pub async fn settle(&self) {
        tokio::time::sleep(SETTLE).await;
    }

    pub async fn screen(&self) -> Screen {
        self.handle.snapshot().await.unwrap().screen
    }

    pub async fn rendered(&self) -> Option<Screen> {
        self.handle.snapshot().await.unwrap().rendered_screen
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.handle.shutdown().unwrap();
        self.task.await.unwrap();
    }
}
