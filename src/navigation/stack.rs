//! Deduplicating navigation stack.
//!
//! The stack lives inside a `watch` channel, so the path observers see and
//! the stack the coordinator mutates are one value. Each mutation runs
//! under the channel's lock and publishes once, which means no observer can
//! catch the stack and its mirror at different lengths.

use tokio::sync::watch;
use tracing::debug;

use super::route::RouteToken;

/// Ordered stack of route tokens mirrored to observers.
#[derive(Debug)]
pub struct NavigationStack {
    path: watch::Sender<Vec<RouteToken>>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStack {
    pub fn new() -> Self {
        let (path, _) = watch::channel(Vec::new());
        Self { path }
    }

    /// Push a route unless it is already on top.
    ///
    /// Returns true if the stack changed.
    pub fn push(&mut self, route: RouteToken) -> bool {
        self.path.send_if_modified(|stack| {
            if stack.last() == Some(&route) {
                debug!(route = %route.id(), "Ignoring duplicate push");
                return false;
            }
            stack.push(route);
            true
        })
    }

    /// Remove the top route. No-op on an empty stack.
    pub fn pop(&mut self) -> bool {
        self.path.send_if_modified(|stack| stack.pop().is_some())
    }

    /// Remove up to `count` routes from the top.
    ///
    /// `count` is clamped to the current depth. Returns true if anything
    /// was removed.
    pub fn pop_multiple(&mut self, count: usize) -> bool {
        self.path.send_if_modified(|stack| {
            let count = count.min(stack.len());
            if count == 0 {
                return false;
            }
            let keep = stack.len() - count;
            stack.truncate(keep);
            true
        })
    }

    /// Clear the stack.
    pub fn reset(&mut self) -> bool {
        self.path.send_if_modified(|stack| {
            if stack.is_empty() {
                return false;
            }
            stack.clear();
            true
        })
    }

    pub fn depth(&self) -> usize {
        self.path.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.borrow().is_empty()
    }

    pub fn top(&self) -> Option<RouteToken> {
        self.path.borrow().last().cloned()
    }

    /// Copy of the current path, bottom first.
    pub fn snapshot(&self) -> Vec<RouteToken> {
        self.path.borrow().clone()
    }

    /// Observe the mirrored path.
    pub fn subscribe(&self) -> watch::Receiver<Vec<RouteToken>> {
        self.path.subscribe()
    }
}
