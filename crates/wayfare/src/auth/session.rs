//! Session issuance and teardown.
//!
//! The issuer owns the login flow: credential lookup through the store
//! contract, secret verification, token issuance, and cookie construction.
//! Teardown is the matching expired cookie. Nothing here persists session
//! state; a token outlives logout until its natural expiry.

use std::sync::Arc;

use tracing::{debug, info};

use super::claims::{Claims, Identity};
use super::codec::TokenCodec;
use super::cookie::{expired_cookie, session_cookie};
use super::error::AuthError;
use super::store::CredentialStore;
use super::track::Track;

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Raw signed token, returned in the login body for non-cookie clients.
    pub token: String,
    /// Set-Cookie value carrying the token.
    pub cookie: String,
    /// Safe projection of the authenticated account.
    pub user: Identity,
}

/// Issues sessions against a credential store.
#[derive(Clone)]
pub struct SessionIssuer {
    codec: Arc<TokenCodec>,
    store: Arc<dyn CredentialStore>,
    secure_cookies: bool,
}

impl SessionIssuer {
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn CredentialStore>, secure_cookies: bool) -> Self {
        Self {
            codec,
            store,
            secure_cookies,
        }
    }

    /// Authenticate `email`/`password` into `track` and issue a session.
    ///
    /// An absent account, a role outside the track, and a wrong password all
    /// collapse into the same `InvalidCredentials`; only the debug log keeps
    /// the distinction. No cookie or other side effect on failure.
    pub async fn login(
        &self,
        track: Track,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let record = self
            .store
            .find_by_email(email)
            .await
            .map_err(AuthError::Upstream)?;

        let Some(record) = record else {
            debug!(track = %track, "login failed: no such account");
            return Err(AuthError::InvalidCredentials);
        };

        if !track.permits(record.role) {
            debug!(track = %track, role = %record.role, "login failed: role outside track");
            return Err(AuthError::InvalidCredentials);
        }

        if !record.verify_secret(password) {
            debug!(track = %track, user_id = %record.id, "login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let identity = Identity {
            id: record.id,
            email: record.email,
            name: record.name,
            role: record.role,
        };

        let session = self.issue(track, identity)?;
        info!(user_id = %session.user.id, track = %track, "session issued");
        Ok(session)
    }

    /// Issue a session for an already-authenticated account.
    ///
    /// Used by login above and by registration, where the account was just
    /// created and the password round-trip would be theater.
    pub fn issue(&self, track: Track, user: Identity) -> Result<Session, AuthError> {
        if !track.permits(user.role) {
            // Reachable only through a programming error; login checks the
            // track before calling.
            return Err(AuthError::Internal(format!(
                "role {} cannot hold a {} session",
                user.role, track
            )));
        }

        let claims = Claims::for_session(
            user.id.clone(),
            user.email.clone(),
            user.name.clone(),
            user.role,
        );
        let token = self.codec.issue(&claims)?;
        let cookie = session_cookie(track, &token, self.secure_cookies);

        Ok(Session {
            token,
            cookie,
            user,
        })
    }

    /// The Set-Cookie value that tears down `track`'s session.
    ///
    /// Pure cookie overwrite; safe to call with or without a live session,
    /// any number of times.
    pub fn teardown(&self, track: Track) -> String {
        expired_cookie(track)
    }
}
