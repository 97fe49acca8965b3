//! Verification of identity tokens signed by the external identity provider.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use folio_core::domain::SessionUser;
use folio_core::ports::{AuthError, IdentityVerifier};

const DEV_SECRET: &str = "change-me-in-production";

/// Identity provider configuration.
#[derive(Debug, Clone)]
pub struct IdpConfig {
    /// HS256 key shared with the identity provider.
    pub secret: String,
    /// Expected `iss` claim.
    pub issuer: String,
    /// Expected `aud` claim, checked only when set.
    pub audience: Option<String>,
}

impl Default for IdpConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            issuer: "folio-idp".to_string(),
            audience: None,
        }
    }
}

impl IdpConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let secret = std::env::var("IDP_SHARED_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEV_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default identity provider secret in production! Set IDP_SHARED_SECRET."
                );
            } else {
                tracing::warn!("Using default identity provider secret. Set IDP_SHARED_SECRET for production use.");
            }
        }

        Self {
            secret,
            issuer: std::env::var("IDP_ISSUER").unwrap_or_else(|_| "folio-idp".to_string()),
            audience: std::env::var("IDP_AUDIENCE").ok(),
        }
    }
}

/// Profile claims carried by an identity token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aud: Option<String>,
    exp: i64,
    iat: i64,
    iss: String,
}

/// HS256 JWT verifier for identity provider tokens.
pub struct JwtIdentityVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: IdpConfig,
}

impl JwtIdentityVerifier {
    pub fn new(config: IdpConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(IdpConfig::from_env())
    }

    /// Sign a token the way the identity provider does. Used by local
    /// development tooling and tests in place of the real provider.
    pub fn issue_token(
        &self,
        subject: &str,
        user: &SessionUser,
        ttl: TimeDelta,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.picture.clone(),
            aud: self.config.audience.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

impl IdentityVerifier for JwtIdentityVerifier {
    fn verify(&self, token: &str) -> Result<SessionUser, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingAuth);
        }

        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        match &self.config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let claims = token_data.claims;
        if claims.name.trim().is_empty() {
            return Err(AuthError::InvalidToken("missing name claim".to_string()));
        }

        tracing::debug!(subject = %claims.sub, "Identity token verified");

        Ok(SessionUser {
            name: claims.name,
            email: claims.email,
            picture: claims.picture,
        })
    }
}
