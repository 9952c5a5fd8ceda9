//! Mock implementations for testing.
//!
//! Test doubles for every trait abstraction, so the state machine can run
//! without file system, keychain, or network access.
//!
//! # Available Mocks
//!
//! - [`InMemoryStore`] - Key-value store with failure injection
//! - [`InMemorySecureStore`] - Secure store with failure injection and clear delay
//! - [`StaticPermissions`] - Configurable pending-permission list
//! - [`RecordingHost`] - Render host that records every callback
//! - [`ScriptedProbe`] - Connectivity probe replaying a script

pub mod host;
pub mod permissions;
pub mod probe;
pub mod secure;
pub mod store;

pub use host::{HostEvent, RecordingHost};
pub use permissions::StaticPermissions;
pub use probe::ScriptedProbe;
pub use secure::InMemorySecureStore;
pub use store::InMemoryStore;
