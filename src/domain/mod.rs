//! Domain objects shared by every component.
//!
//! These are plain values with no I/O attached. Components read and produce
//! them; adapters fill them in from external stores.
//!
//! ## Domain Objects
//!
//! - [`AuthFacts`] - Snapshot of the persisted facts the evaluator consumes
//! - [`Screen`] - The top-level application mode driving root-view selection
//! - [`SecureProfile`] - Record read from the secure credential store
//! - [`Permission`] - Runtime permissions the host may still need to request
//! - [`ConnectivityStatus`] - Discrete status reported by a connectivity monitor

pub mod connectivity;
pub mod facts;
pub mod profile;
pub mod screen;

pub use connectivity::ConnectivityStatus;
pub use facts::AuthFacts;
pub use profile::{Permission, SecureProfile};
pub use screen::Screen;
