//! Account state: provider boundary and the session's auth controller.
//!
//! The extraction core does not depend on this module; it exists for the
//! account-sync feature. The provider itself (OAuth dance, token
//! endpoint) is an external collaborator behind [`AccountProvider`].

use chrono::{Duration, NaiveDateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::models::{AuthOutcome, AuthPhase, AuthSession, User};

/// Refresh tokens this close to their expiry.
const TOKEN_EXPIRY_LEEWAY_MINUTES: i64 = 5;

/// Capability boundary of the third-party account provider.
pub trait AccountProvider {
    fn is_signed_in(&self) -> bool;
    fn sign_in(&self) -> AuthOutcome;
    fn sign_out(&self) -> AuthOutcome;
    fn refresh(&self) -> AuthOutcome;
}

/// Immutable view of the authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub phase: AuthPhase,
    pub user: Option<User>,
}

/// Single owner of the session's auth state.
///
/// Replaces globally shared mutable auth state: the controller holds the
/// session, drives the phase machine, and emits immutable snapshots to
/// subscribers.
pub struct AuthController<P> {
    provider: P,
    session: Option<AuthSession>,
    tx: watch::Sender<AuthSnapshot>,
}

impl<P: AccountProvider> AuthController<P> {
    /// Create a controller; the initial phase reflects whether the
    /// provider already has a signed-in account.
    pub fn new(provider: P) -> Self {
        let phase = if provider.is_signed_in() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Unauthenticated
        };
        let (tx, _rx) = watch::channel(AuthSnapshot { phase, user: None });
        Self { provider, session: None, tx }
    }

    /// Register an observer of auth snapshots.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    /// Current session, if any.
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Sign in through the provider, publishing the intermediate
    /// `Authenticating` phase and the terminal outcome.
    pub fn sign_in(&mut self) -> AuthOutcome {
        self.publish(AuthPhase::Authenticating, None);

        let outcome = self.provider.sign_in();
        match &outcome.session {
            Some(session) if outcome.success => {
                info!("signed in as {}", session.user.email);
                self.session = Some(session.clone());
                self.publish(AuthPhase::Authenticated, Some(session.user.clone()));
            }
            _ => {
                self.session = None;
                self.publish(AuthPhase::Error, None);
            }
        }
        outcome
    }

    /// Sign out and drop the session.
    pub fn sign_out(&mut self) -> AuthOutcome {
        let outcome = self.provider.sign_out();
        self.session = None;
        self.publish(AuthPhase::Unauthenticated, None);
        outcome
    }

    /// Refresh the token only when it is near expiry. With no session,
    /// fails; with a comfortably valid token, succeeds with the current
    /// session without calling the provider.
    pub fn refresh_if_needed(&mut self) -> AuthOutcome {
        self.refresh_if_needed_at(Utc::now().naive_utc())
    }

    fn refresh_if_needed_at(&mut self, now: NaiveDateTime) -> AuthOutcome {
        let Some(session) = &self.session else {
            return AuthOutcome::failure("no authenticated session");
        };

        let leeway = Duration::minutes(TOKEN_EXPIRY_LEEWAY_MINUTES);
        if !session.token.expires_within(now, leeway) {
            debug!("token still valid, skipping refresh");
            return AuthOutcome::ok(session.clone());
        }

        let outcome = self.provider.refresh();
        match &outcome.session {
            Some(refreshed) if outcome.success => {
                self.session = Some(refreshed.clone());
                self.publish(AuthPhase::Authenticated, Some(refreshed.user.clone()));
            }
            _ => {
                let user = self.tx.borrow().user.clone();
                self.publish(AuthPhase::Error, user);
            }
        }
        outcome
    }

    fn publish(&self, phase: AuthPhase, user: Option<User>) {
        self.tx.send_replace(AuthSnapshot { phase, user });
    }
}
