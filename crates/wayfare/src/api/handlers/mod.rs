//! API request handlers.
//!
//! Handlers are organized by domain:
//! - `auth`: login, logout, identity check, and registration for both tracks
//! - `pages`: server-rendered pages behind the route interception layer
//! - `misc`: health check

mod auth;
mod misc;
mod pages;

// Authentication handlers and types
pub use auth::{
    IdentityResponse, LoginRequest, LogoutResponse, RegisterRequest, SessionResponse, admin_login,
    admin_logout, admin_me, consumer_login, consumer_logout, consumer_me, consumer_register,
};

// Server-rendered pages
pub use pages::{
    admin_dashboard, admin_login_page, consumer_dashboard, consumer_login_page,
    consumer_register_page, landing,
};

// Health check
pub use misc::{HealthResponse, health};
