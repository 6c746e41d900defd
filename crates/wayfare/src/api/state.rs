//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::{AuthConfig, RoleGate, SessionIssuer, TokenCodec};
use crate::user::UserService;

/// Application state shared across all handlers.
///
/// One token codec backs both the session issuer and the role gate, so the
/// two tracks differ only in the `Track` value handlers pass in.
#[derive(Clone)]
pub struct AppState {
    /// User service; doubles as the credential store behind login.
    pub users: Arc<UserService>,
    /// Session issuer for login, registration, and logout.
    pub issuer: SessionIssuer,
    /// Role gate for token checks and the route interception layer.
    pub gate: RoleGate,
    /// Auth configuration (dev mode, CORS origins).
    pub auth: AuthConfig,
}

impl AppState {
    /// Create new application state.
    ///
    /// `signing_secret` comes pre-resolved from [`AuthConfig::signing_secret`];
    /// the config itself is kept only for its non-secret knobs.
    pub fn new(users: UserService, auth: AuthConfig, signing_secret: &str) -> Self {
        let users = Arc::new(users);
        let codec = Arc::new(TokenCodec::new(signing_secret));
        let issuer = SessionIssuer::new(codec.clone(), users.clone(), auth.secure_cookies());
        let gate = RoleGate::new(codec);

        Self {
            users,
            issuer,
            gate,
            auth,
        }
    }
}
