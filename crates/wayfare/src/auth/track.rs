//! The two authorization tracks.
//!
//! Admin and consumer sessions are the same mechanism instantiated twice;
//! everything that differs between them (cookie name, allowed roles, path
//! tables) lives here as a method on [`Track`].

use serde::{Deserialize, Serialize};

use super::claims::Role;

/// One of the two independent authorization domains.
///
/// Tracks never interact: each reads only its own cookie, and a valid session
/// on one track has no bearing on decisions for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Consumer,
    Admin,
}

/// How the interception layer treats a path for a given track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Requires an authenticated session on this track.
    Protected,
    /// Login/register surface; authenticated sessions are bounced away.
    AuthOnly,
    /// Not governed by this track.
    Open,
}

impl Track {
    /// Both tracks, in evaluation order.
    pub const ALL: [Track; 2] = [Track::Consumer, Track::Admin];

    /// Name of the session cookie this track reads and writes.
    pub fn cookie_name(self) -> &'static str {
        match self {
            Track::Consumer => "consumer-token",
            Track::Admin => "admin-token",
        }
    }

    /// Roles allowed to hold a session on this track.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Track::Consumer => &[Role::Consumer],
            Track::Admin => &[Role::SuperAdmin, Role::TourismAdmin],
        }
    }

    /// Whether `role` may authenticate into this track.
    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// Login page; unauthenticated requests to protected paths land here.
    pub fn login_path(self) -> &'static str {
        match self {
            Track::Consumer => "/consumer/login",
            Track::Admin => "/admin/login",
        }
    }

    /// Authenticated landing page; logged-in visits to auth-only paths land here.
    pub fn home_path(self) -> &'static str {
        match self {
            Track::Consumer => "/consumer/dashboard",
            Track::Admin => "/admin/dashboard",
        }
    }

    /// Path prefix that requires an authenticated session.
    pub fn protected_prefix(self) -> &'static str {
        match self {
            Track::Consumer => "/consumer/dashboard",
            Track::Admin => "/admin/dashboard",
        }
    }

    /// Pages only shown to unauthenticated visitors (exact matches).
    pub fn auth_only_paths(self) -> &'static [&'static str] {
        match self {
            Track::Consumer => &["/consumer/login", "/consumer/register"],
            Track::Admin => &["/admin/login"],
        }
    }

    /// Classify `path` for this track.
    pub fn classify_path(self, path: &str) -> PathKind {
        if path.starts_with(self.protected_prefix()) {
            PathKind::Protected
        } else if self.auth_only_paths().contains(&path) {
            PathKind::AuthOnly
        } else {
            PathKind::Open
        }
    }

    /// Short label for logs and API route segments.
    pub fn label(self) -> &'static str {
        match self {
            Track::Consumer => "consumer",
            Track::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
