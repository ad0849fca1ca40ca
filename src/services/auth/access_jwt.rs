/*
 * Responsibility
 * - HS256 (共有シークレット) で署名された access token の検証
 * - 署名 / exp / nbf を jsonwebtoken で検証し、IdentityClaim に decode する
 * - exp は必須。exp なしの token を発行するクライアントとは互換性がない
 * - HTTP には依存しない (失敗は AccessJwtError で返す)
 */
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by access-token verification + claim checks.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

/// Decoded payload of a verified access token.
///
/// `userId` / `email` are the application claims issued by the login endpoint;
/// the remaining fields are registered JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,

    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

/// Shared-secret access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenVerifier {
    pub fn from_secret(secret: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens signed with any HMAC variant of the same secret are accepted.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp"]);
        // No audience is configured for this API; an `aud` claim is not an error.
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature + expiry, then require non-empty `userId` and `email`.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<IdentityClaim>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.user_id.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("userId"));
        }
        if claims.email.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("email"));
        }

        Ok(claims)
    }
}
