//! Account/session models for the third-party account provider boundary.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Account holder as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub is_email_verified: bool,
}

/// Bearer-style token with an expiry timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    pub expires_at: NaiveDateTime,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl AuthToken {
    /// Whether the token expires within `leeway` of `now`.
    pub fn expires_within(&self, now: NaiveDateTime, leeway: Duration) -> bool {
        self.expires_at <= now + leeway
    }
}

/// An authenticated session: user plus current token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: AuthToken,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Phase of the authentication state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Error,
}

/// Result of a provider operation (sign-in/out, refresh).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<AuthSession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn ok(session: AuthSession) -> Self {
        Self { success: true, session: Some(session), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, session: None, error: Some(error.into()) }
    }

    /// Success without a session (e.g. sign-out).
    pub fn signed_out() -> Self {
        Self { success: true, session: None, error: None }
    }
}
