//! User data models.

use serde::{Deserialize, Serialize};

use crate::auth::{Credential, Identity, Role};

/// A user account row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Bcrypt hash. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Identity {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

impl From<User> for Credential {
    fn from(user: User) -> Self {
        Credential {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            password_hash: user.password_hash,
        }
    }
}

/// Request to create a new user account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    /// Plaintext at the service boundary; the service hashes it before it
    /// reaches the repository.
    pub password: String,
    pub name: Option<String>,
    /// Defaults to `CONSUMER` when absent.
    pub role: Option<Role>,
}
