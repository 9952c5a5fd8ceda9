//! Callbacks into the rendering host.
//!
//! The crate never builds views itself. It hands the host a [`RootView`]
//! (the settled screen plus the capability to materialize it) and the
//! current navigation path; the host owns everything visual.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::domain::Screen;
use crate::navigation::RouteToken;

/// A host-defined view, opaque to this crate.
pub type HostView = Box<dyn Any + Send>;

/// Builds the root view for a screen.
///
/// Implemented for any `Fn(Screen) -> HostView`, so hosts can pass a closure.
pub trait ScreenViews: Send + Sync {
    fn build(&self, screen: Screen) -> HostView;
}

impl<F> ScreenViews for F
where
    F: Fn(Screen) -> HostView + Send + Sync,
{
    fn build(&self, screen: Screen) -> HostView {
        self(screen)
    }
}

/// The settled screen together with the capability to build its view.
#[derive(Clone)]
pub struct RootView {
    screen: Screen,
    views: Arc<dyn ScreenViews>,
}

impl RootView {
    pub fn new(screen: Screen, views: Arc<dyn ScreenViews>) -> Self {
        Self { screen, views }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Build the host view for this screen.
    pub fn materialize(&self) -> HostView {
        self.views.build(self.screen)
    }
}

impl fmt::Debug for RootView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootView")
            .field("screen", &self.screen)
            .finish_non_exhaustive()
    }
}

/// Rendering host callbacks.
///
/// All three are invoked from the app event loop, one at a time.
pub trait RenderHost: Send {
    /// Swap the rendered root to a newly settled screen.
    fn present_root(&mut self, view: RootView);

    /// Show or hide the connectivity overlay.
    fn set_overlay_visible(&mut self, visible: bool);

    /// Replace the host navigation widget's path.
    fn sync_path(&mut self, path: &[RouteToken]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_views_materialize() {
        let views: Arc<dyn ScreenViews> =
            Arc::new(|screen: Screen| -> HostView { Box::new(screen.as_str().to_string()) });
        let root = RootView::new(Screen::Home, views);

        assert_eq!(root.screen(), Screen::Home);
        let built = root.materialize();
        assert_eq!(built.downcast_ref::<String>().unwrap(), "home");
    }

    #[test]
    fn test_root_view_debug_hides_factory() {
        let views: Arc<dyn ScreenViews> = Arc::new(|_: Screen| -> HostView { Box::new(()) });
        let root = RootView::new(Screen::Login, views);
        let debug = format!("{:?}", root);
        assert!(debug.contains("Login"));
    }
}
