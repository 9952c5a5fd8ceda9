//! Route tokens.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::traits::HostView;

/// Structural identity of a route.
///
/// Two routes are the same entry when their names and parameters match,
/// regardless of which token instance carries them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId {
    name: String,
    params: BTreeMap<String, String>,
}

impl RouteId {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter that participates in identity.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.params.is_empty() {
            let params: Vec<String> = self
                .params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, "?{}", params.join("&"))?;
        }
        Ok(())
    }
}

type ViewBuilder = Arc<dyn Fn() -> HostView + Send + Sync>;

/// A navigation stack entry: identity plus the capability to build its view.
///
/// Equality compares [`RouteId`] only; the view builder is ignored.
#[derive(Clone)]
pub struct RouteToken {
    id: RouteId,
    view: Option<ViewBuilder>,
}

impl RouteToken {
    /// Create a token with no view builder attached.
    pub fn new(id: RouteId) -> Self {
        Self { id, view: None }
    }

    /// Shorthand for a parameterless route.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(RouteId::new(name))
    }

    /// Attach the closure the host uses to build this route's view.
    pub fn with_view<F>(mut self, build: F) -> Self
    where
        F: Fn() -> HostView + Send + Sync + 'static,
    {
        self.view = Some(Arc::new(build));
        self
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    /// Build the host view, if a builder was attached.
    pub fn materialize(&self) -> Option<HostView> {
        self.view.as_ref().map(|build| build())
    }
}

impl PartialEq for RouteToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RouteToken {}

impl fmt::Debug for RouteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteToken")
            .field("id", &self.id)
            .field("has_view", &self.view.is_some())
            .finish()
    }
}
