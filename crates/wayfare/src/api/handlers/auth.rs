//! Authentication endpoints.
//!
//! Every endpoint exists once, parameterized by [`Track`]; the public
//! `consumer_*`/`admin_*` functions are thin wrappers so the router can name
//! a concrete handler per path. Registration is consumer-only: admin-track
//! accounts are created through the CLI, never over HTTP.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::{AuthError, Identity, Track, bearer_token_from_header, session_token};
use crate::user::CreateUserRequest;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by login and registration: the session token plus the safe
/// user projection. The token is also set as the track cookie.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub message: String,
    pub user: Identity,
    pub token: String,
}

/// Logout response body.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Identity-check response body.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Registration request body (consumer track only).
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Login against one track.
///
/// Malformed bodies become a 400 with the parser's field detail; every
/// credential failure is the issuer's uniform 401.
#[instrument(skip(state, body))]
async fn login(
    state: AppState,
    track: Track,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(request) = body.map_err(|e| AuthError::SchemaInvalid(e.body_text()))?;

    if request.email.is_empty() {
        return Err(AuthError::SchemaInvalid("email must not be empty".to_string()));
    }
    if request.password.is_empty() {
        return Err(AuthError::SchemaInvalid("password must not be empty".to_string()));
    }

    let session = state
        .issuer
        .login(track, &request.email, &request.password)
        .await?;

    Ok((
        AppendHeaders([(SET_COOKIE, session.cookie)]),
        Json(SessionResponse {
            message: "Login successful".to_string(),
            user: session.user,
            token: session.token,
        }),
    ))
}

/// Tear down one track's session cookie.
///
/// Always succeeds, with or without a live session; the issued token itself
/// stays valid until expiry.
async fn logout(state: AppState, track: Track) -> impl IntoResponse {
    let cookie = state.issuer.teardown(track);

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LogoutResponse { success: true }),
    )
}

/// Identity check for one track.
///
/// Reads the track cookie first, then an `Authorization: Bearer` header for
/// non-cookie clients. Any failure is the same anonymous 401.
async fn identity_check(state: AppState, track: Track, headers: HeaderMap) -> impl IntoResponse {
    let token = session_token(&headers, track).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(bearer_token_from_header)
    });

    match token.map(|t| state.gate.authorize(t, track)) {
        Some(Ok(identity)) => (
            StatusCode::OK,
            Json(IdentityResponse {
                authenticated: true,
                user: Some(identity),
                message: None,
            }),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(IdentityResponse {
                authenticated: false,
                user: None,
                message: Some("not authenticated".to_string()),
            }),
        ),
    }
}

// ============================================================================
// Consumer track
// ============================================================================

/// POST /api/consumer/login
pub async fn consumer_login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    login(state, Track::Consumer, body).await
}

/// POST /api/consumer/logout
pub async fn consumer_logout(State(state): State<AppState>) -> impl IntoResponse {
    logout(state, Track::Consumer).await
}

/// GET /api/consumer/me
pub async fn consumer_me(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    identity_check(state, Track::Consumer, headers).await
}

/// POST /api/consumer/register
///
/// Creates a `CONSUMER` account and immediately issues a consumer session,
/// so a fresh registration lands on the dashboard without a second login.
#[instrument(skip(state, body))]
pub async fn consumer_register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let user = state
        .users
        .create_user(CreateUserRequest {
            email: request.email,
            password: request.password,
            // Browsers submit omitted optional fields as empty strings.
            name: request.name.filter(|n| !n.trim().is_empty()),
            role: None,
        })
        .await?;

    let session = state.issuer.issue(Track::Consumer, Identity::from(user))?;
    info!(user_id = %session.user.id, "consumer registered");

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(SET_COOKIE, session.cookie)]),
        Json(SessionResponse {
            message: "Registration successful".to_string(),
            user: session.user,
            token: session.token,
        }),
    ))
}

// ============================================================================
// Admin track
// ============================================================================

/// POST /api/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    login(state, Track::Admin, body).await
}

/// POST /api/admin/logout
pub async fn admin_logout(State(state): State<AppState>) -> impl IntoResponse {
    logout(state, Track::Admin).await
}

/// GET /api/admin/me
pub async fn admin_me(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    identity_check(state, Track::Admin, headers).await
}
