//! Application state manager.
//!
//! Owns the current [`Screen`]. Every entry point ends in
//! [`AppStateManager::refresh_app_state`], which reads a fresh fact snapshot,
//! runs the decision table, applies its side effects, and notifies
//! subscribers only when the screen actually changed.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::domain::Screen;
use crate::error::StoreError;
use crate::evaluator::{decide, transition_effects, PermissionRouting, TransitionEffects};
use crate::facts::FactSource;

/// Owns the current screen and the fact mutations that move it.
#[derive(Debug)]
pub struct AppStateManager {
    facts: FactSource,
    routing: PermissionRouting,
    current: Screen,
    loading: watch::Sender<bool>,
    subscribers: Vec<mpsc::UnboundedSender<Screen>>,
}

impl AppStateManager {
    /// Create the manager and determine the initial screen.
    pub async fn new(facts: FactSource, routing: PermissionRouting) -> Self {
        let (loading, _) = watch::channel(false);
        let mut manager = Self {
            facts,
            routing,
            current: Screen::default(),
            loading,
            subscribers: Vec::new(),
        };
        manager.determine_initial_app_state().await;
        manager
    }

    /// Evaluate once and set the current screen without notifying.
    pub async fn determine_initial_app_state(&mut self) {
        self.current = self.evaluate().await;
        info!(screen = %self.current, "Initial app state determined");
    }

    /// Re-evaluate and notify subscribers if the screen changed.
    ///
    /// Returns true if a notification was sent.
    pub async fn refresh_app_state(&mut self) -> bool {
        let screen = self.evaluate().await;
        if screen == self.current {
            debug!(screen = %screen, "App state unchanged; suppressing notification");
            return false;
        }

        info!(from = %self.current, to = %screen, "App state changed");
        self.current = screen;
        self.subscribers.retain(|tx| tx.send(screen).is_ok());
        true
    }

    pub async fn mark_app_as_launched(&mut self) {
        if let Err(e) = self.facts.mark_launched().await {
            warn!(error = %e, "Failed to persist launch marker");
        }
        self.refresh_app_state().await;
    }

    pub async fn mark_permission_setup_completed(&mut self) {
        if let Err(e) = self.facts.set_permission_completed(true).await {
            warn!(error = %e, "Failed to persist permission completion");
        }
        self.refresh_app_state().await;
    }

    pub async fn reset_permission_setup(&mut self) {
        if let Err(e) = self.facts.set_permission_completed(false).await {
            warn!(error = %e, "Failed to reset permission completion");
        }
        self.refresh_app_state().await;
    }

    /// Log the user out.
    ///
    /// Clears all user data, then the logged-out sentinel, then permission
    /// setup, then refreshes, strictly in that order. If the clear fails
    /// nothing else happens and `false` is returned so the caller can retry.
    pub async fn handle_user_logout(&mut self) -> bool {
        let Some(facts) = self.begin_logout() else {
            return false;
        };
        let cleared = facts.clear_user_data().await;
        self.finish_logout(cleared).await
    }

    /// Raise the loading flag and hand out the facts for the wipe.
    ///
    /// Returns `None` while another logout is in flight. The wipe itself may
    /// run anywhere; its outcome goes to [`AppStateManager::finish_logout`].
    pub fn begin_logout(&self) -> Option<FactSource> {
        if self.is_loading() {
            warn!("Logout already in progress");
            return None;
        }
        self.loading.send_replace(true);
        Some(self.facts.clone())
    }

    /// Apply the outcome of a wipe started with [`AppStateManager::begin_logout`].
    pub async fn finish_logout(&mut self, cleared: Result<(), StoreError>) -> bool {
        if let Err(e) = cleared {
            warn!(error = %e, code = e.error_code(), "Logout failed; state left unchanged");
            self.loading.send_replace(false);
            return false;
        }

        if let Err(e) = self.facts.clear_logged_out().await {
            warn!(error = %e, "Failed to clear logged-out sentinel during logout");
        }
        if let Err(e) = self.facts.set_permission_completed(false).await {
            warn!(error = %e, "Failed to reset permission completion during logout");
        }
        self.refresh_app_state().await;
        self.loading.send_replace(false);
        info!("User logged out");
        true
    }

    /// The caller already stored the new token.
    pub async fn handle_successful_login(&mut self) {
        self.refresh_app_state().await;
    }

    /// The caller already cleared the profile-completion requirement.
    pub async fn handle_profile_completion(&mut self) {
        self.refresh_app_state().await;
    }

    /// The caller already restored the token.
    pub async fn handle_token_restoration(&mut self) {
        self.refresh_app_state().await;
    }

    /// Accept the session found on the old-login screen.
    ///
    /// Clears the logged-out sentinel and marks the app launched, so the
    /// evaluator moves on to the signed-in screens.
    pub async fn acknowledge_previous_login(&mut self) {
        if let Err(e) = self.facts.set_logged_out(false).await {
            warn!(error = %e, "Failed to clear logged-out sentinel");
        }
        if let Err(e) = self.facts.mark_launched().await {
            warn!(error = %e, "Failed to persist launch marker");
        }
        self.refresh_app_state().await;
    }

    /// Register for screen change notifications.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Screen> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Observe the logout loading flag.
    pub fn loading_watch(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    async fn evaluate(&self) -> Screen {
        let snapshot = self.facts.snapshot().await;
        let screen = decide(&snapshot, self.routing);
        self.apply_effects(transition_effects(&snapshot)).await;
        screen
    }

    async fn apply_effects(&self, effects: TransitionEffects) {
        if effects.persist_logged_out {
            debug!("Token survived a fresh install; marking previous session logged out");
            if let Err(e) = self.facts.set_logged_out(true).await {
                warn!(error = %e, "Failed to persist logged-out sentinel");
            }
        }
    }
}
