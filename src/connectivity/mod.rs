//! Connectivity tracking and overlay hysteresis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ ConnectivityProbe│  (HTTP probe, host-fed statuses)
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │  StatusFilter   │  repeats dropped at the source
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │   Debouncer     │  500ms, ground truth
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Overlay policy  │  show after 2000ms, hide immediately
//! └─────────────────┘
//! ```

mod debouncer;
mod filter;
mod hysteresis;
mod monitor;

pub use debouncer::{Debouncer, DEBOUNCE_WINDOW};
pub use filter::StatusFilter;
pub use hysteresis::{ConnectivityHysteresis, OVERLAY_SHOW_DELAY};
pub use monitor::spawn_monitor;
