//! Session token codec.
//!
//! HS256 issue/verify over [`Claims`]. The signing secret is injected at
//! construction; there is no ambient global, so tests can run codecs with
//! distinct secrets side by side.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::warn;

use super::claims::Claims;
use super::error::AuthError;

/// Issues and verifies signed session tokens.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec over `secret`. Expiry checking is exact (zero leeway).
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear(); // Allow missing iss/aud

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign `claims` into a compact token.
    ///
    /// Deterministic for identical claims and secret; the timestamps live in
    /// the claims themselves.
    pub fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {}", e)))
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Every failure collapses to [`AuthError::TokenInvalid`]: callers must
    /// treat malformed input, signature mismatch, and expiry identically, so
    /// no distinguishing detail crosses this boundary. The underlying error
    /// kind is logged for operators.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                warn!(kind = ?e.kind(), "token verification failed");
                Err(AuthError::TokenInvalid)
            }
        }
    }
}
