//! Session token claims, platform roles, and the public identity projection.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Platform role attached to every credential record.
///
/// Roles use their wire form (`SUPER_ADMIN`, ...) in tokens, API responses,
/// and the database `role` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full platform administrator.
    SuperAdmin,
    /// Administrator for tourism content (destinations, tickets).
    TourismAdmin,
    /// Regular visitor account.
    #[default]
    Consumer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::SuperAdmin => write!(f, "SUPER_ADMIN"),
            Role::TourismAdmin => write!(f, "TOURISM_ADMIN"),
            Role::Consumer => write!(f, "CONSUMER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "TOURISM_ADMIN" => Ok(Role::TourismAdmin),
            "CONSUMER" => Ok(Role::Consumer),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Session token lifetime: seven days, fixed. No refresh or rotation.
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Signed session token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (credential record id).
    pub sub: String,

    /// Account email.
    pub email: String,

    /// Display name, if the record has one.
    #[serde(default)]
    pub name: Option<String>,

    /// Role at issuance time. Not re-checked against the store until expiry.
    pub role: Role,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Build claims for a fresh session expiring `ttl` from now.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: Option<String>,
        role: Role,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: id.into(),
            email: email.into(),
            name,
            role,
            iat: now,
            exp: now + ttl.num_seconds(),
        }
    }

    /// Claims for a standard seven-day session.
    pub fn for_session(
        id: impl Into<String>,
        email: impl Into<String>,
        name: Option<String>,
        role: Role,
    ) -> Self {
        Self::new(id, email, name, role, Duration::seconds(SESSION_TTL_SECS))
    }
}

/// Safe user projection: everything a client may see about an account.
///
/// Returned by login and identity-check endpoints and attached to requests
/// that pass the interception layer. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

impl Identity {
    /// Name to greet the user with on rendered pages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

impl From<&Claims> for Identity {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: claims.role,
        }
    }
}
