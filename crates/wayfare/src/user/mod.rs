//! User account management.
//!
//! Persistence and validation for credential records; implements the auth
//! core's store contract over SQLite.

mod models;
mod repository;
mod service;

pub use models::{CreateUserRequest, User};
pub use repository::UserRepository;
pub use service::{UserService, UserStats};
