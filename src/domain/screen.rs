//! Top-level screens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents which top-level screen the host should display.
///
/// There is no ordering between screens; which one is current is decided
/// solely by [`crate::evaluator::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Splash,
    OldLoginDetection,
    ProfileUpdate,
    Permissions,
    Home,
    Login,
}

impl Screen {
    /// Every screen, in declaration order.
    pub const ALL: [Screen; 6] = [
        Screen::Splash,
        Screen::OldLoginDetection,
        Screen::ProfileUpdate,
        Screen::Permissions,
        Screen::Home,
        Screen::Login,
    ];

    /// Short label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Splash => "splash",
            Screen::OldLoginDetection => "old_login_detection",
            Screen::ProfileUpdate => "profile_update",
            Screen::Permissions => "permissions",
            Screen::Home => "home",
            Screen::Login => "login",
        }
    }

    /// Whether this is the screen the app starts from.
    pub fn is_initial(&self) -> bool {
        matches!(self, Screen::Splash)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_splash() {
        assert_eq!(Screen::default(), Screen::Splash);
        assert!(Screen::default().is_initial());
    }

    #[test]
    fn test_only_splash_is_initial() {
        let initial: Vec<_> = Screen::ALL.iter().filter(|s| s.is_initial()).collect();
        assert_eq!(initial, vec![&Screen::Splash]);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Screen::OldLoginDetection).unwrap();
        assert_eq!(json, "\"old_login_detection\"");

        let parsed: Screen = serde_json::from_str("\"profile_update\"").unwrap();
        assert_eq!(parsed, Screen::ProfileUpdate);
    }

    #[test]
    fn test_display_matches_as_str() {
        for screen in Screen::ALL {
            assert_eq!(screen.to_string(), screen.as_str());
        }
    }
}
