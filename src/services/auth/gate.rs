//! Bearer-token gate for protected requests.
//!
//! Per request the gate is a one-pass state machine:
//! `Start -> MissingToken | MalformedToken | InvalidToken | Authenticated`.
//!
//! The gate only returns a typed result. Mapping a rejection to an HTTP
//! response is done in `crate::error`, placing the claim into request
//! extensions is done by `crate::middleware::auth::access`.

use thiserror::Error;

use crate::services::auth::access_jwt::{IdentityClaim, TokenVerifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("authorization header not provided")]
    MissingToken,
    #[error("authorization header is not `Bearer <token>`")]
    MalformedToken,
    #[error("token failed verification")]
    InvalidToken,
}

#[derive(Clone, Debug)]
pub struct AuthGate {
    verifier: TokenVerifier,
}

impl AuthGate {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    pub fn from_secret(secret: &str, leeway_seconds: u64) -> Self {
        Self::new(TokenVerifier::from_secret(secret, leeway_seconds))
    }

    /// Authenticate a raw `Authorization` header value.
    pub fn authenticate(&self, header: Option<&str>) -> Result<IdentityClaim, AuthRejection> {
        let token = bearer_token(header)?;

        self.verifier.verify(token).map_err(|err| {
            tracing::warn!(error = %err, "access token verification failed");
            AuthRejection::InvalidToken
        })
    }
}

/// Extract `<token>` from `"<scheme> <token>"`.
///
/// The header is split on a single space, so `"Bearer  t"` has three parts
/// and is malformed. An empty token (`"Bearer "`) passes here and fails
/// verification.
fn bearer_token(header: Option<&str>) -> Result<&str, AuthRejection> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AuthRejection::MissingToken),
    };

    let parts: Vec<&str> = header.split(' ').collect();
    let [scheme, token] = parts.as_slice() else {
        return Err(AuthRejection::MalformedToken);
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthRejection::MalformedToken);
    }

    Ok(*token)
}
