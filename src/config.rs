//! Runtime configuration.
//!
//! Timing constants, the permission routing policy, and the optional
//! connectivity probe and data directory.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::app::SETTLE_DELAY;
use crate::connectivity::{DEBOUNCE_WINDOW, OVERLAY_SHOW_DELAY};
use crate::evaluator::PermissionRouting;

/// Default interval between connectivity probes.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(5);

/// Default timeout for a single connectivity probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration for the app.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use waypoint::config::WaypointConfig;
///
/// let config = WaypointConfig::default()
///     .with_settle_delay(Duration::from_millis(50))
///     .with_probe_url("https://example.com/health");
/// assert_eq!(config.settle_delay, Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointConfig {
    /// Delay before a root swap (default: 100ms)
    pub settle_delay: Duration,
    /// Connectivity debounce window (default: 500ms)
    pub debounce_window: Duration,
    /// Delay before the offline overlay is shown (default: 2000ms)
    pub overlay_show_delay: Duration,
    /// Where an incomplete permission setup routes (default: straight to Home)
    pub permission_routing: PermissionRouting,
    /// URL polled by the HTTP connectivity probe; no probe when unset
    pub probe_url: Option<String>,
    pub probe_interval: Duration,
    pub probe_timeout: Duration,
    /// Overrides `~/.waypoint` for the file-backed stores
    pub data_dir: Option<PathBuf>,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            settle_delay: SETTLE_DELAY,
            debounce_window: DEBOUNCE_WINDOW,
            overlay_show_delay: OVERLAY_SHOW_DELAY,
            permission_routing: PermissionRouting::default(),
            probe_url: None,
            probe_interval: DEFAULT_PROBE_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            data_dir: None,
        }
    }
}

impl WaypointConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    pub fn with_overlay_show_delay(mut self, delay: Duration) -> Self {
        self.overlay_show_delay = delay;
        self
    }

    pub fn with_permission_routing(mut self, routing: PermissionRouting) -> Self {
        self.permission_routing = routing;
        self
    }

    /// Enable the HTTP connectivity probe against `url`.
    pub fn with_probe_url(mut self, url: impl Into<String>) -> Self {
        self.probe_url = Some(url.into());
        self
    }

    pub fn with_probe_interval(mut self, interval: Duration) -> Self {
        self.probe_interval = interval;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Build from `WAYPOINT_*` environment variables over the defaults.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = env_parse::<u64>("WAYPOINT_SETTLE_MS") {
            config.settle_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse::<u64>("WAYPOINT_DEBOUNCE_MS") {
            config.debounce_window = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse::<u64>("WAYPOINT_OVERLAY_DELAY_MS") {
            config.overlay_show_delay = Duration::from_millis(ms);
        }
        if let Some(require) = env_flag("WAYPOINT_REQUIRE_PERMISSIONS") {
            config.permission_routing = if require {
                PermissionRouting::RequirePermissions
            } else {
                PermissionRouting::BypassToHome
            };
        }
        if let Some(url) = env_string("WAYPOINT_PROBE_URL") {
            config.probe_url = Some(url);
        }
        if let Some(secs) = env_parse::<u64>("WAYPOINT_PROBE_INTERVAL_SECS") {
            if secs == 0 {
                warn!("WAYPOINT_PROBE_INTERVAL_SECS must be positive; using default");
            } else {
                config.probe_interval = Duration::from_secs(secs);
            }
        }
        if let Some(dir) = env_string("WAYPOINT_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        config
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_string(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable config value");
            None
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let raw = env_string(key)?;
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(key, value = %raw, "Ignoring unparseable config flag");
            None
        }
    }
}
