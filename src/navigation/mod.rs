//! Navigation stack and route tokens.
//!
//! The stack is driven by explicit navigation calls from the host. The
//! only automatic mutation is the coordinator's reset when the app settles
//! back on the splash screen.

mod route;
mod stack;

pub use route::{RouteId, RouteToken};
pub use stack::NavigationStack;
