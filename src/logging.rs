//! Tracing subscriber setup for hosts that do not install their own.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{WaypointError, WaypointResult};

/// Install a global subscriber with an `EnvFilter` and a `fmt` layer.
///
/// `RUST_LOG` is honoured; `default_directive` (for example `"waypoint=info"`)
/// is added on top. Fails instead of panicking if the directive is invalid
/// or a global subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> WaypointResult<()> {
    let directive: Directive = default_directive
        .parse()
        .map_err(|e: tracing_subscriber::filter::ParseError| WaypointError::Config {
            key: "log_directive".to_string(),
            message: e.to_string(),
        })?;

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(directive))
        .with(fmt::layer())
        .try_init()
        .map_err(|e| WaypointError::Config {
            key: "tracing_subscriber".to_string(),
            message: e.to_string(),
        })
}
