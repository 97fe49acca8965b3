//! Identity provider port.

use crate::domain::SessionUser;

/// Verifies the signed profile an external identity provider hands the
/// client after a successful login.
pub trait IdentityVerifier: Send + Sync {
    /// Validate `token` and return the principal it vouches for.
    fn verify(&self, token: &str) -> Result<SessionUser, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing credentials")]
    MissingAuth,
}
