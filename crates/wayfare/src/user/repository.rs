//! User repository for database operations.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::models::User;
use crate::auth::Role;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate a new user ID.
    fn generate_id() -> String {
        format!("usr_{}", nanoid::nanoid!(12))
    }

    /// Insert a new user. `password_hash` must already be hashed.
    #[instrument(skip(self, password_hash), fields(email = %email))]
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
        role: Role,
    ) -> Result<User> {
        let id = Self::generate_id();

        debug!("Creating user: {} ({})", email, id);

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, name, role)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to insert user")?;

        self.get(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found after creation"))
    }

    /// Get a user by ID.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, role, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user")?;

        Ok(user)
    }

    /// Get a user by email.
    #[instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, role, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        Ok(user)
    }

    /// List all users, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, role, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list users")?;

        Ok(users)
    }

    /// Check if an email is available.
    #[instrument(skip(self))]
    pub async fn is_email_available(&self, email: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check email availability")?;

        Ok(count.0 == 0)
    }

    /// Count total users.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count users")?;

        Ok(count.0)
    }

    /// Count users by role.
    #[instrument(skip(self))]
    pub async fn count_by_role(&self, role: Role) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = ?")
            .bind(role.to_string())
            .fetch_one(&self.pool)
            .await
            .context("Failed to count users by role")?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();

        sqlx::query(
            r#"
            CREATE TABLE users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT,
                role TEXT NOT NULL DEFAULT 'CONSUMER',
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = setup_test_db().await;
        let repo = UserRepository::new(pool);

        let user = repo
            .create("test@example.com", "hashed", Some("Test User"), Role::Consumer)
            .await
            .unwrap();
        assert!(user.id.starts_with("usr_"));
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name.as_deref(), Some("Test User"));
        assert_eq!(user.role, Role::Consumer);

        let fetched = repo.get(&user.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, user.id);

        let by_email = repo.get_by_email("test@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        assert!(repo.get_by_email("missing@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let pool = setup_test_db().await;
        let repo = UserRepository::new(pool);

        repo.create("dup@example.com", "h1", None, Role::Consumer)
            .await
            .unwrap();
        let err = repo
            .create("dup@example.com", "h2", None, Role::Consumer)
            .await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_email_availability() {
        let pool = setup_test_db().await;
        let repo = UserRepository::new(pool);

        assert!(repo.is_email_available("new@example.com").await.unwrap());
        repo.create("new@example.com", "h", None, Role::Consumer)
            .await
            .unwrap();
        assert!(!repo.is_email_available("new@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_role_round_trips_through_db() {
        let pool = setup_test_db().await;
        let repo = UserRepository::new(pool);

        for role in [Role::SuperAdmin, Role::TourismAdmin, Role::Consumer] {
            let email = format!("{}@example.com", role.to_string().to_lowercase());
            let user = repo.create(&email, "h", None, role).await.unwrap();
            let fetched = repo.get(&user.id).await.unwrap().unwrap();
            assert_eq!(fetched.role, role);
        }
    }

    #[tokio::test]
    async fn test_count_by_role() {
        let pool = setup_test_db().await;
        let repo = UserRepository::new(pool);

        repo.create("a@example.com", "h", None, Role::Consumer)
            .await
            .unwrap();
        repo.create("b@example.com", "h", None, Role::Consumer)
            .await
            .unwrap();
        repo.create("c@example.com", "h", None, Role::SuperAdmin)
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 3);
        assert_eq!(repo.count_by_role(Role::Consumer).await.unwrap(), 2);
        assert_eq!(repo.count_by_role(Role::SuperAdmin).await.unwrap(), 1);
        assert_eq!(repo.count_by_role(Role::TourismAdmin).await.unwrap(), 0);
    }
}
