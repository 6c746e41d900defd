//! Authentication configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Well-known development fallback secret.
///
/// Only ever used when `dev_mode` is on and no secret is configured;
/// [`AuthConfig::validate`] refuses to start a non-dev deployment with it.
pub const DEV_FALLBACK_SECRET: &str = "wayfare-dev-secret-do-not-deploy";

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Enable development mode (plain-http cookies, fallback secret allowed).
    pub dev_mode: bool,

    /// JWT signing secret for HS256. Supports `env:VAR_NAME` indirection.
    /// REQUIRED when dev_mode is false.
    pub jwt_secret: Option<String>,

    /// Allowed CORS origins for the JSON API.
    pub allowed_origins: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            // No default JWT secret - must be explicitly configured
            jwt_secret: None,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8080".to_string(),
            ],
        }
    }
}

impl AuthConfig {
    /// Resolve the JWT secret, expanding `env:VAR_NAME` syntax.
    /// Returns the resolved secret or None if not configured.
    pub fn resolve_jwt_secret(&self) -> Result<Option<String>, ConfigValidationError> {
        match &self.jwt_secret {
            None => Ok(None),
            Some(value) => {
                if let Some(var_name) = value.strip_prefix("env:") {
                    match std::env::var(var_name) {
                        Ok(secret) if !secret.is_empty() => Ok(Some(secret)),
                        Ok(_) => Err(ConfigValidationError::EnvVarEmpty(var_name.to_string())),
                        Err(_) => Err(ConfigValidationError::EnvVarNotFound(var_name.to_string())),
                    }
                } else {
                    Ok(Some(value.clone()))
                }
            }
        }
    }

    /// The secret the token codec signs with.
    ///
    /// Dev mode without a configured secret falls back to
    /// [`DEV_FALLBACK_SECRET`] with a loud warning; everywhere else a missing
    /// secret is an error.
    pub fn signing_secret(&self) -> Result<String, ConfigValidationError> {
        match self.resolve_jwt_secret()? {
            Some(secret) => Ok(secret),
            None if self.dev_mode => {
                warn!(
                    "no jwt_secret configured; using the well-known development \
                     fallback. Do not deploy this configuration."
                );
                Ok(DEV_FALLBACK_SECRET.to_string())
            }
            None => Err(ConfigValidationError::MissingJwtSecret),
        }
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        !self.dev_mode
    }

    /// Validate the configuration.
    /// Returns an error if the configuration is invalid for the current mode.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.dev_mode {
            let secret = self.resolve_jwt_secret()?;

            let Some(secret) = secret else {
                return Err(ConfigValidationError::MissingJwtSecret);
            };

            // The fallback is a published value; refusing it outright beats
            // warning and carrying on.
            if secret == DEV_FALLBACK_SECRET {
                return Err(ConfigValidationError::InsecureJwtSecret);
            }
            if secret.len() < 32 {
                return Err(ConfigValidationError::JwtSecretTooShort);
            }
        }

        Ok(())
    }

    /// Generate a secure random JWT secret using cryptographically secure RNG.
    ///
    /// Uses the `rand` crate with `ThreadRng` which is backed by the OS's
    /// cryptographically secure random number generator (via `getrandom`).
    pub fn generate_jwt_secret() -> String {
        use rand::Rng;

        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        const SECRET_LENGTH: usize = 64;

        let mut rng = rand::rng();
        (0..SECRET_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// JWT secret is required outside dev mode.
    MissingJwtSecret,
    /// JWT secret is the published development fallback.
    InsecureJwtSecret,
    /// JWT secret is too short (minimum 32 characters).
    JwtSecretTooShort,
    /// Environment variable not found (for `env:VAR_NAME` syntax).
    EnvVarNotFound(String),
    /// Environment variable is empty (for `env:VAR_NAME` syntax).
    EnvVarEmpty(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingJwtSecret => {
                write!(
                    f,
                    "JWT secret is required when dev_mode is false. Set WAYFARE__AUTH__JWT_SECRET or jwt_secret in config."
                )
            }
            Self::InsecureJwtSecret => {
                write!(
                    f,
                    "JWT secret is the well-known development fallback. Configure a real secret (try `wayfare init`)."
                )
            }
            Self::JwtSecretTooShort => {
                write!(
                    f,
                    "JWT secret must be at least 32 characters long for security."
                )
            }
            Self::EnvVarNotFound(var) => {
                write!(
                    f,
                    "Environment variable '{}' not found (referenced via env:{} in config).",
                    var, var
                )
            }
            Self::EnvVarEmpty(var) => {
                write!(
                    f,
                    "Environment variable '{}' is empty (referenced via env:{} in config).",
                    var, var
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

#[cfg(test)]
#[allow(clippy::field_reassign_with_default)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(!config.dev_mode);
        // No default JWT secret for security
        assert!(config.jwt_secret.is_none());
        assert!(!config.allowed_origins.is_empty());
    }

    #[test]
    fn test_config_validation_dev_mode() {
        let mut config = AuthConfig::default();
        config.dev_mode = true;
        // Dev mode should be valid without JWT secret
        assert!(config.validate().is_ok());
        assert_eq!(config.signing_secret().unwrap(), DEV_FALLBACK_SECRET);
    }

    #[test]
    fn test_config_validation_production_mode_no_secret() {
        let mut config = AuthConfig::default();
        config.dev_mode = false;
        config.jwt_secret = None;

        assert_eq!(
            config.validate().unwrap_err(),
            ConfigValidationError::MissingJwtSecret
        );
        assert!(config.signing_secret().is_err());
    }

    #[test]
    fn test_config_validation_production_mode_fallback_secret() {
        let mut config = AuthConfig::default();
        config.dev_mode = false;
        config.jwt_secret = Some(DEV_FALLBACK_SECRET.to_string());

        assert_eq!(
            config.validate().unwrap_err(),
            ConfigValidationError::InsecureJwtSecret
        );
    }

    #[test]
    fn test_config_validation_production_mode_short_secret() {
        let mut config = AuthConfig::default();
        config.dev_mode = false;
        config.jwt_secret = Some("tooshort".to_string());

        assert_eq!(
            config.validate().unwrap_err(),
            ConfigValidationError::JwtSecretTooShort
        );
    }

    #[test]
    fn test_config_validation_production_mode_valid() {
        let mut config = AuthConfig::default();
        config.dev_mode = false;
        config.jwt_secret =
            Some("a-very-long-and-secure-jwt-secret-that-is-at-least-32-chars".to_string());

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_jwt_secret_literal() {
        let mut config = AuthConfig::default();
        config.jwt_secret = Some("my-literal-secret".to_string());

        let resolved = config.resolve_jwt_secret().unwrap();
        assert_eq!(resolved, Some("my-literal-secret".to_string()));
    }

    #[test]
    fn test_resolve_jwt_secret_env_var() {
        // SAFETY: This is a test-only environment variable with a unique name
        unsafe {
            std::env::set_var(
                "TEST_WAYFARE_JWT_SECRET",
                "secret-from-env-var-at-least-32-chars",
            );
        }

        let mut config = AuthConfig::default();
        config.jwt_secret = Some("env:TEST_WAYFARE_JWT_SECRET".to_string());

        let resolved = config.resolve_jwt_secret().unwrap();
        assert_eq!(
            resolved,
            Some("secret-from-env-var-at-least-32-chars".to_string())
        );

        // SAFETY: Cleaning up test environment variable
        unsafe {
            std::env::remove_var("TEST_WAYFARE_JWT_SECRET");
        }
    }

    #[test]
    fn test_resolve_jwt_secret_env_var_not_found() {
        let mut config = AuthConfig::default();
        config.jwt_secret = Some("env:NONEXISTENT_WAYFARE_VAR".to_string());

        let result = config.resolve_jwt_secret();
        assert_eq!(
            result.unwrap_err(),
            ConfigValidationError::EnvVarNotFound("NONEXISTENT_WAYFARE_VAR".to_string())
        );
    }

    #[test]
    fn test_generate_jwt_secret_length_and_charset() {
        let secret = AuthConfig::generate_jwt_secret();
        assert_eq!(secret.len(), 64, "Secret should be 64 characters long");
        assert!(
            secret.chars().all(|c| c.is_ascii_alphanumeric()),
            "Secret should only contain alphanumeric characters"
        );
    }

    #[test]
    fn test_generate_jwt_secret_passes_validation() {
        let mut config = AuthConfig::default();
        config.dev_mode = false;
        config.jwt_secret = Some(AuthConfig::generate_jwt_secret());
        assert!(config.validate().is_ok());
    }
}
