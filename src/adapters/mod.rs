//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`FileKeyValueStore`] - Preferences in a JSON file
//! - [`FileSecureStore`] - Profile in an owner-only JSON file
//! - [`HttpProbeMonitor`] - Connectivity probe using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every trait:
//! - [`mock::InMemoryStore`] - In-memory preferences
//! - [`mock::InMemorySecureStore`] - In-memory profile storage
//! - [`mock::StaticPermissions`] - Fixed pending-permission list
//! - [`mock::RecordingHost`] - Render host recording callbacks
//! - [`mock::ScriptedProbe`] - Connectivity probe replaying a script

pub mod file_secure;
pub mod file_store;
pub mod http_probe;
mod json_file;
pub mod mock;

pub use file_secure::FileSecureStore;
pub use file_store::FileKeyValueStore;
pub use http_probe::HttpProbeMonitor;
pub use mock::{InMemorySecureStore, InMemoryStore, RecordingHost, ScriptedProbe, StaticPermissions};
