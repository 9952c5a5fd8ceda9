//! Waypoint - readiness state machine, navigation stack, and connectivity
//! overlay for an embedding host.
//!
//! The host supplies the stores, a permission checker, and a [`RenderHost`]
//! to draw into; [`App`] decides which top-level screen to show, when to
//! swap it, and when to raise the offline overlay.
//!
//! [`RenderHost`]: traits::RenderHost
//! [`App`]: app::App

pub mod adapters;
pub mod app;
pub mod config;
pub mod connectivity;
pub mod domain;
pub mod error;
pub mod evaluator;
pub mod facts;
pub mod logging;
pub mod manager;
pub mod navigation;
pub mod timer;
pub mod traits;
