//! Role gate: the pure per-track authorization decision.
//!
//! A gate verdict is a function of (token, track) and nothing else. It never
//! re-queries the credential store, so role changes or deletions after
//! issuance take effect only when the token expires.

use std::sync::Arc;

use tracing::debug;

use super::claims::Identity;
use super::codec::TokenCodec;
use super::error::AuthError;
use super::track::Track;

/// One request's session state for a single track.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackState {
    /// No session token presented for this track.
    Anonymous,
    /// A token was presented but fails verification (malformed, tampered,
    /// or expired).
    Invalid,
    /// Valid token whose role is outside this track's allowed set.
    WrongTrack,
    /// Valid token, permitted role.
    Authenticated(Identity),
}

impl TrackState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, TrackState::Authenticated(_))
    }
}

/// Decides what a presented token is worth on a given track.
#[derive(Clone)]
pub struct RoleGate {
    codec: Arc<TokenCodec>,
}

impl RoleGate {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Classify a request's session state for `track`.
    ///
    /// The interception layer needs the full state (its cookie-clearing rule
    /// applies only to `Invalid`); endpoint callers should prefer
    /// [`authorize`](Self::authorize).
    pub fn evaluate(&self, token: Option<&str>, track: Track) -> TrackState {
        let Some(token) = token else {
            return TrackState::Anonymous;
        };

        match self.codec.verify(token) {
            Err(_) => TrackState::Invalid,
            Ok(claims) if track.permits(claims.role) => {
                TrackState::Authenticated(Identity::from(&claims))
            }
            Ok(claims) => {
                debug!(role = %claims.role, track = %track, "valid token held by wrong track");
                TrackState::WrongTrack
            }
        }
    }

    /// Authorize a token for `track`.
    ///
    /// Denial is uniform: a failed verification and a wrong-track role are
    /// both `TokenInvalid` to the caller, so responses cannot distinguish
    /// the two.
    pub fn authorize(&self, token: &str, track: Track) -> Result<Identity, AuthError> {
        match self.evaluate(Some(token), track) {
            TrackState::Authenticated(identity) => Ok(identity),
            _ => Err(AuthError::TokenInvalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::{Claims, Role};
    use chrono::Utc;

    const TEST_SECRET: &str = "test-secret-for-unit-tests-minimum-32-chars-long";

    fn gate() -> RoleGate {
        RoleGate::new(Arc::new(TokenCodec::new(TEST_SECRET)))
    }

    fn token_for(role: Role) -> String {
        let codec = TokenCodec::new(TEST_SECRET);
        let claims = Claims::for_session("usr_1", "u@example.com", None, role);
        codec.issue(&claims).unwrap()
    }

    #[test]
    fn test_evaluate_anonymous() {
        assert_eq!(gate().evaluate(None, Track::Admin), TrackState::Anonymous);
    }

    #[test]
    fn test_evaluate_invalid_token() {
        assert_eq!(
            gate().evaluate(Some("garbage"), Track::Consumer),
            TrackState::Invalid
        );
    }

    #[test]
    fn test_evaluate_wrong_track() {
        let consumer_token = token_for(Role::Consumer);
        assert_eq!(
            gate().evaluate(Some(&consumer_token), Track::Admin),
            TrackState::WrongTrack
        );
    }

    #[test]
    fn test_evaluate_authenticated() {
        let token = token_for(Role::TourismAdmin);
        let state = gate().evaluate(Some(&token), Track::Admin);
        match state {
            TrackState::Authenticated(identity) => {
                assert_eq!(identity.role, Role::TourismAdmin);
                assert_eq!(identity.id, "usr_1");
            }
            other => panic!("expected authenticated, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_token_evaluates_invalid() {
        let codec = TokenCodec::new(TEST_SECRET);
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "usr_1".to_string(),
            email: "u@example.com".to_string(),
            name: None,
            role: Role::SuperAdmin,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = codec.issue(&claims).unwrap();

        assert_eq!(
            gate().evaluate(Some(&token), Track::Admin),
            TrackState::Invalid
        );
    }

    #[test]
    fn test_authorize_denies_uniformly() {
        let g = gate();
        let consumer_token = token_for(Role::Consumer);

        // Wrong track and garbage produce the same error variant.
        let wrong_track = g.authorize(&consumer_token, Track::Admin).unwrap_err();
        let garbage = g.authorize("garbage", Track::Admin).unwrap_err();
        assert!(matches!(wrong_track, AuthError::TokenInvalid));
        assert!(matches!(garbage, AuthError::TokenInvalid));
    }

    #[test]
    fn test_authorize_both_admin_roles() {
        let g = gate();
        for role in [Role::SuperAdmin, Role::TourismAdmin] {
            let token = token_for(role);
            let identity = g.authorize(&token, Track::Admin).unwrap();
            assert_eq!(identity.role, role);
        }
    }
}
