//! Credential store contract.
//!
//! The auth core never talks to persistence directly; it sees this trait and
//! the [`Credential`] record it yields. The SQLite-backed implementation
//! lives in the user module, and tests substitute in-memory fakes.

use async_trait::async_trait;

use super::claims::Role;

/// Credential record as the auth core sees it. Read-only from this side.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub password_hash: String,
}

impl Credential {
    /// Verify a plaintext secret against the stored hash.
    ///
    /// Delegates to bcrypt, whose comparison does not leak prefix-match
    /// timing; a malformed hash verifies as false rather than erroring.
    pub fn verify_secret(&self, plain: &str) -> bool {
        bcrypt::verify(plain, &self.password_hash).unwrap_or(false)
    }
}

/// Lookup interface the session issuer depends on.
///
/// Any error from an implementation means the store itself is unreachable or
/// broken, and surfaces as [`AuthError::Upstream`]; "no such user" is the
/// `Ok(None)` case, never an error.
///
/// [`AuthError::Upstream`]: super::error::AuthError::Upstream
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the credential record for `email`, if one exists.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Credential>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential_with_hash(hash: &str) -> Credential {
        Credential {
            id: "usr_1".to_string(),
            email: "a@b.test".to_string(),
            name: None,
            role: Role::Consumer,
            password_hash: hash.to_string(),
        }
    }

    #[test]
    fn test_verify_secret_round_trip() {
        let hash = bcrypt::hash("correct horse", 4).unwrap();
        let credential = credential_with_hash(&hash);

        assert!(credential.verify_secret("correct horse"));
        assert!(!credential.verify_secret("battery staple"));
    }

    #[test]
    fn test_verify_secret_malformed_hash_is_false() {
        let credential = credential_with_hash("not-a-bcrypt-hash");
        assert!(!credential.verify_secret("anything"));
    }
}
