//! Recording render host for testing.
//!
//! Captures every callback the coordinator makes so tests can assert on
//! the exact sequence of root swaps, overlay toggles, and path syncs.

use std::sync::{Arc, Mutex};

use crate::domain::Screen;
use crate::navigation::{RouteId, RouteToken};
use crate::traits::{RenderHost, RootView};

/// One recorded host callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Root(Screen),
    Overlay(bool),
    Path(Vec<RouteId>),
}

/// Render host that records callbacks.
///
/// Clones share the same log; keep one clone and hand the other to the app.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    events: Arc<Mutex<Vec<HostEvent>>>,
    /// Materialize each root view as it arrives.
    materialize: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every presented root view, exercising the host's view factory.
    pub fn materializing() -> Self {
        Self {
            materialize: true,
            ..Self::default()
        }
    }

    /// All recorded callbacks in order.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Screens presented as root, in order.
    pub fn roots(&self) -> Vec<Screen> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::Root(screen) => Some(screen),
                _ => None,
            })
            .collect()
    }

    /// Overlay visibility changes, in order.
    pub fn overlay_changes(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::Overlay(visible) => Some(visible),
                _ => None,
            })
            .collect()
    }

    /// The last path synced to the host, if any.
    pub fn last_path(&self) -> Option<Vec<RouteId>> {
        self.events().into_iter().rev().find_map(|e| match e {
            HostEvent::Path(path) => Some(path),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RenderHost for RecordingHost {
    fn present_root(&mut self, view: RootView) {
        if self.materialize {
            let _ = view.materialize();
        }
        self.record(HostEvent::Root(view.screen()));
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        self.record(HostEvent::Overlay(visible));
    }

    fn sync_path(&mut self, path: &[RouteToken]) {
        self.record(HostEvent::Path(path.iter().map(|r| r.id().clone()).collect()));
    }
}
