//! Dual-track session authentication.
//!
//! Admin and consumer sessions are one mechanism instantiated twice:
//! - [`TokenCodec`] signs and verifies session tokens (HS256, injected secret)
//! - [`SessionIssuer`] turns verified credentials into token + cookie
//! - [`RoleGate`] decides what a presented token is worth on a track
//! - [`route_interception`] applies the per-track page rules ahead of handlers

mod claims;
mod codec;
mod config;
mod cookie;
mod error;
mod gate;
mod intercept;
mod session;
mod store;
mod track;

pub use claims::{Claims, Identity, Role, SESSION_TTL_SECS};
pub use codec::TokenCodec;
pub use config::{AuthConfig, ConfigValidationError, DEV_FALLBACK_SECRET};
pub use cookie::{bearer_token_from_header, expired_cookie, session_cookie, session_token};
pub use error::AuthError;
pub use gate::{RoleGate, TrackState};
pub use intercept::{CurrentIdentity, route_interception};
pub use session::{Session, SessionIssuer};
pub use store::{Credential, CredentialStore};
pub use track::{PathKind, Track};
