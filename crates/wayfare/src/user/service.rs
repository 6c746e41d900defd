//! User service for account management.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tracing::{info, instrument};

use super::models::{CreateUserRequest, User};
use super::repository::UserRepository;
use crate::auth::{Credential, CredentialStore, Role};

/// Service for user account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Create a new account with validation.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        if !is_valid_email(&request.email) {
            bail!("Invalid email format.");
        }

        if request.password.len() < 6 {
            bail!("Password must be at least 6 characters.");
        }

        if !self.repo.is_email_available(&request.email).await? {
            bail!("Email '{}' is already registered.", request.email);
        }

        let role = request.role.unwrap_or(Role::Consumer);
        let password_hash = hash_password(&request.password)?;

        let user = self
            .repo
            .create(&request.email, &password_hash, request.name.as_deref(), role)
            .await?;
        info!(user_id = %user.id, role = %user.role, "Created new user");

        Ok(user)
    }

    /// Get a user by email.
    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repo.get_by_email(email).await
    }

    /// List all users.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.repo.list().await
    }

    /// Whether any admin-track account exists.
    #[instrument(skip(self))]
    pub async fn has_admin_account(&self) -> Result<bool> {
        let supers = self.repo.count_by_role(Role::SuperAdmin).await?;
        let tourism = self.repo.count_by_role(Role::TourismAdmin).await?;
        Ok(supers + tourism > 0)
    }

    /// Get user statistics.
    #[instrument(skip(self))]
    pub async fn get_stats(&self) -> Result<UserStats> {
        let total = self.repo.count().await?;
        let super_admins = self.repo.count_by_role(Role::SuperAdmin).await?;
        let tourism_admins = self.repo.count_by_role(Role::TourismAdmin).await?;
        let consumers = self.repo.count_by_role(Role::Consumer).await?;

        Ok(UserStats {
            total,
            super_admins,
            tourism_admins,
            consumers,
        })
    }
}

/// The user table is the credential store the session issuer reads.
#[async_trait]
impl CredentialStore for UserService {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>> {
        Ok(self.repo.get_by_email(email).await?.map(Credential::from))
    }
}

/// User statistics.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserStats {
    pub total: i64,
    pub super_admins: i64,
    pub tourism_admins: i64,
    pub consumers: i64,
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    !parts[0].is_empty() && parts[1].contains('.')
}

/// Hash a password using bcrypt.
fn hash_password(password: &str) -> Result<String> {
    // Use a lower cost factor for development speed
    let cost = if cfg!(debug_assertions) { 4 } else { 10 };
    bcrypt::hash(password, cost).context("Failed to hash password")
}
