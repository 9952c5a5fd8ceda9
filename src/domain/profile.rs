//! Secure-store profile record and runtime permissions.

use serde::{Deserialize, Serialize};

/// Profile record held by the secure credential store.
///
/// Only the token and the completion flag feed the evaluator; the rest is
/// carried so hosts can greet a returning user on the old-login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureProfile {
    /// Access token for the backend, if the user is signed in.
    pub token: Option<String>,
    /// The backend asked for the profile to be completed.
    #[serde(default)]
    pub requires_profile_completion: bool,
    pub mobile_number: Option<String>,
    pub display_name: Option<String>,
    /// URL or storage key of the profile picture.
    pub profile_picture: Option<String>,
    /// When the token was stored (Unix seconds).
    pub stored_at: Option<i64>,
}

impl SecureProfile {
    /// Create a profile holding only a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            stored_at: Some(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
    }

    /// Check if the profile carries a non-empty token.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Runtime permissions a host may still need to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Notifications,
    Camera,
    PhotoLibrary,
    Location,
    Contacts,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Notifications => "notifications",
            Permission::Camera => "camera",
            Permission::PhotoLibrary => "photo_library",
            Permission::Location => "location",
            Permission::Contacts => "contacts",
        }
    }
}
