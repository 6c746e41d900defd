//! Test utilities and common setup.
#![allow(clippy::field_reassign_with_default)]
#![allow(dead_code)]

use axum::Router;
use chrono::Utc;
use wayfare::api;
use wayfare::auth::{AuthConfig, Claims, Role, Track, TokenCodec};
use wayfare::db::Database;
use wayfare::user::{CreateUserRequest, UserRepository, UserService};

/// Signing secret shared by the app under test and token helpers.
pub const TEST_SECRET: &str = "test-secret-for-integration-tests-minimum-32-chars";

pub const CONSUMER_EMAIL: &str = "nina@example.com";
pub const CONSUMER_PASSWORD: &str = "wanderlust7";
pub const TOURISM_ADMIN_EMAIL: &str = "tourism@example.com";
pub const TOURISM_ADMIN_PASSWORD: &str = "guidebook9";
pub const SUPER_ADMIN_EMAIL: &str = "root@example.com";
pub const SUPER_ADMIN_PASSWORD: &str = "rootpass123";

/// Create a test AuthConfig with a JWT secret for testing.
fn test_auth_config() -> AuthConfig {
    let mut config = AuthConfig::default();
    config.dev_mode = true;
    // Set a JWT secret for tests (required for token generation)
    config.jwt_secret = Some(TEST_SECRET.to_string());
    config
}

async fn seed_account(service: &UserService, email: &str, password: &str, role: Role) {
    service
        .create_user(CreateUserRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: Some(email.split('@').next().unwrap().to_string()),
            role: Some(role),
        })
        .await
        .expect("seed test account");
}

/// Create a test application with one account per role.
pub async fn test_app() -> Router {
    // Use in-memory database for tests
    let db = Database::in_memory().await.unwrap();

    let user_repo = UserRepository::new(db.pool().clone());
    let user_service = UserService::new(user_repo);

    seed_account(
        &user_service,
        CONSUMER_EMAIL,
        CONSUMER_PASSWORD,
        Role::Consumer,
    )
    .await;
    seed_account(
        &user_service,
        TOURISM_ADMIN_EMAIL,
        TOURISM_ADMIN_PASSWORD,
        Role::TourismAdmin,
    )
    .await;
    seed_account(
        &user_service,
        SUPER_ADMIN_EMAIL,
        SUPER_ADMIN_PASSWORD,
        Role::SuperAdmin,
    )
    .await;

    let state = api::AppState::new(user_service, test_auth_config(), TEST_SECRET);
    api::create_router(state)
}

/// Sign a token for `role` with the app's secret, expiring `ttl_secs` from
/// now (negative for an already-expired token).
pub fn mint_token(role: Role, ttl_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "usr_minted00001".to_string(),
        email: "minted@example.com".to_string(),
        name: None,
        role,
        iat: now,
        exp: now + ttl_secs,
    };
    TokenCodec::new(TEST_SECRET).issue(&claims).unwrap()
}

/// Cookie header pair carrying a freshly minted session for `role`'s track.
pub fn session_cookie_pair(role: Role, ttl_secs: i64) -> String {
    let track = Track::ALL
        .into_iter()
        .find(|t| t.permits(role))
        .expect("every role belongs to a track");
    format!("{}={}", track.cookie_name(), mint_token(role, ttl_secs))
}

/// A structurally valid, correctly typed token whose signature does not
/// match the app's secret.
pub fn foreign_token(role: Role) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "usr_forged00001".to_string(),
        email: "forged@example.com".to_string(),
        name: None,
        role,
        iat: now,
        exp: now + 3600,
    };
    TokenCodec::new("a-different-secret-also-at-least-32-chars")
        .issue(&claims)
        .unwrap()
}
