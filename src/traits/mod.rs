//! Trait abstractions for dependency injection and testability.
//!
//! Every external collaborator is reached through one of these traits, so
//! the state machine can be driven entirely by in-memory doubles in tests.
//!
//! # Traits
//!
//! - [`KeyValueStore`] - Generic string/boolean preferences
//! - [`SecureStore`] - Secure credential and profile storage
//! - [`PermissionChecker`] - Runtime permissions still pending
//! - [`ConnectivityProbe`] - One-shot connectivity check
//! - [`RenderHost`] / [`ScreenViews`] - Callbacks into the rendering host

pub mod connectivity;
pub mod permissions;
pub mod render;
pub mod secure;
pub mod store;

pub use connectivity::ConnectivityProbe;
pub use permissions::PermissionChecker;
pub use render::{HostView, RenderHost, RootView, ScreenViews};
pub use secure::SecureStore;
pub use store::KeyValueStore;
