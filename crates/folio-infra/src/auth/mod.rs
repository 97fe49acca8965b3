//! Identity provider integrations.

mod jwt;

pub use jwt::{IdpConfig, JwtIdentityVerifier};
