//! Route interception layer.
//!
//! A single middleware pass ahead of every page and API handler. Each track
//! is evaluated independently, from its own cookie only; the path tables are
//! disjoint, so at most one track claims a request and the first decision
//! short-circuits. Downstream handlers on protected paths receive the
//! verified [`Identity`] through request extensions and never re-check the
//! token.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, header::SET_COOKIE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use super::claims::Identity;
use super::cookie::{expired_cookie, session_token};
use super::error::AuthError;
use super::gate::{RoleGate, TrackState};
use super::track::{PathKind, Track};

/// Interception middleware. Layer once, over the whole router.
pub async fn route_interception(
    State(gate): State<RoleGate>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();

    for track in Track::ALL {
        match track.classify_path(&path) {
            PathKind::Open => continue,

            PathKind::Protected => {
                let state = gate.evaluate(session_token(req.headers(), track), track);
                return match state {
                    TrackState::Authenticated(identity) => {
                        req.extensions_mut().insert(identity);
                        next.run(req).await
                    }
                    state => {
                        // Anonymous, invalid, and wrong-track all bounce to
                        // login. The cookie is left alone here; only
                        // auth-only pages clear it.
                        debug!(track = %track, path = %path, state = ?state, "redirecting to login");
                        Redirect::temporary(track.login_path()).into_response()
                    }
                };
            }

            PathKind::AuthOnly => {
                let state = gate.evaluate(session_token(req.headers(), track), track);
                return match state {
                    TrackState::Authenticated(_) => {
                        debug!(track = %track, path = %path, "already authenticated, redirecting home");
                        Redirect::temporary(track.home_path()).into_response()
                    }
                    TrackState::Invalid => {
                        // Treat as anonymous and clear the broken cookie, or
                        // it would shadow every future login attempt.
                        debug!(track = %track, path = %path, "clearing invalid session cookie");
                        let mut response = next.run(req).await;
                        if let Ok(value) = expired_cookie(track).parse() {
                            response.headers_mut().append(SET_COOKIE, value);
                        }
                        response
                    }
                    _ => next.run(req).await,
                };
            }
        }
    }

    next.run(req).await
}

/// Verified identity attached by the interception layer.
///
/// Extractor for handlers that live behind a protected path; rejects with a
/// 401 if the layer did not attach an identity (which means the route was
/// wired outside the protected tree).
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AuthError::TokenInvalid)
    }
}
