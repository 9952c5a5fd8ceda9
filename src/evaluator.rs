//! Screen decision table.
//!
//! [`decide`] maps an [`AuthFacts`] snapshot to a [`Screen`]. It is pure and
//! total: no I/O, no failure, defined for all 32 fact combinations. The one
//! persistence write tied to a decision (the logged-out sentinel on a fresh
//! install that still holds a token) is described separately by
//! [`transition_effects`] and applied by the state manager.
//!
//! Rules, first match wins:
//!
//! | fresh | token | logged out | profile pending | screen |
//! |-------|-------|------------|-----------------|--------|
//! | yes | no | - | - | Splash |
//! | yes | yes | - | - | OldLoginDetection |
//! | no | yes | yes | - | OldLoginDetection |
//! | no | yes | no | yes | ProfileUpdate |
//! | no | yes | no | no | Home (or Permissions, see [`PermissionRouting`]) |
//! | no | no | - | - | Login |

use serde::{Deserialize, Serialize};

use crate::domain::{AuthFacts, Screen};

/// Where a signed-in user with a complete profile lands when permission
/// setup is still incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionRouting {
    /// Go straight to Home. Permissions is only reachable by explicit
    /// navigation.
    #[default]
    BypassToHome,
    /// Route to Permissions until setup is marked complete.
    RequirePermissions,
}

/// Decide the screen for a fact snapshot.
pub fn decide(facts: &AuthFacts, routing: PermissionRouting) -> Screen {
    let AuthFacts {
        has_token,
        is_fresh_install,
        is_logged_out,
        is_profile_pending,
        is_permission_completed,
    } = *facts;

    match (is_fresh_install, has_token) {
        (true, false) => Screen::Splash,
        (true, true) => Screen::OldLoginDetection,
        (false, false) => Screen::Login,
        (false, true) if is_logged_out => Screen::OldLoginDetection,
        (false, true) if is_profile_pending => Screen::ProfileUpdate,
        (false, true) => match routing {
            PermissionRouting::BypassToHome => Screen::Home,
            PermissionRouting::RequirePermissions if is_permission_completed => Screen::Home,
            PermissionRouting::RequirePermissions => Screen::Permissions,
        },
    }
}

/// Persistence writes that accompany a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionEffects {
    /// Persist the logged-out sentinel so the next launch keeps asking the
    /// returning user to confirm the old session.
    pub persist_logged_out: bool,
}

impl TransitionEffects {
    pub fn is_empty(&self) -> bool {
        !self.persist_logged_out
    }
}

/// Describe the writes that go with the decision for `facts`.
///
/// A token surviving into a fresh install means a previous install's
/// session; it is marked logged out until the user acknowledges it.
pub fn transition_effects(facts: &AuthFacts) -> TransitionEffects {
    TransitionEffects {
        persist_logged_out: facts.is_fresh_install && facts.has_token,
    }
}
