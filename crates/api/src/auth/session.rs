//! Verification of identity-provider session tokens.
//!
//! The web client signs in through an external identity provider and
//! forwards the provider's session JWT as a Bearer token. The API trusts
//! only the `email` claim of a token whose signature, expiry, and (when
//! configured) issuer check out.
//!
//! Production deployments verify RS256 tokens against the provider's PEM
//! public key. A shared HS256 secret is accepted for local development and
//! tests, where [`sign_with_secret`] mints tokens.

use std::fmt;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims read from a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the identity provider's user id.
    pub sub: String,
    /// Primary email address of the signed-in user.
    pub email: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Token issuer, checked when [`SessionConfig::issuer`] is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Key material used to check token signatures.
#[derive(Clone)]
pub enum SessionKey {
    /// PEM-encoded RSA public key of the identity provider (RS256).
    RsaPublicPem(String),
    /// Shared HMAC secret (HS256).
    Secret(String),
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKey::RsaPublicPem(_) => f.write_str("RsaPublicPem(..)"),
            SessionKey::Secret(_) => f.write_str("Secret(<redacted>)"),
        }
    }
}

/// Session verification settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub key: SessionKey,
    /// Required `iss` claim, if any.
    pub issuer: Option<String>,
}

impl SessionConfig {
    /// Load session settings from environment variables.
    ///
    /// | Env Var               | Required                     |
    /// |-----------------------|------------------------------|
    /// | `IDENTITY_PUBLIC_KEY` | one of these two             |
    /// | `SESSION_SECRET`      | one of these two             |
    /// | `IDENTITY_ISSUER`     | no                           |
    ///
    /// `IDENTITY_PUBLIC_KEY` wins when both are set.
    ///
    /// # Panics
    ///
    /// Panics if neither key variable is set to a non-empty value.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let key = match (non_empty("IDENTITY_PUBLIC_KEY"), non_empty("SESSION_SECRET")) {
            // Allow single-line env files with literal "\n" sequences.
            (Some(pem), _) => SessionKey::RsaPublicPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) => SessionKey::Secret(secret),
            (None, None) => panic!("IDENTITY_PUBLIC_KEY or SESSION_SECRET must be set"),
        };

        Self {
            key,
            issuer: non_empty("IDENTITY_ISSUER"),
        }
    }
}

/// Checks Bearer tokens against a prepared decoding key.
pub struct SessionVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    /// Build a verifier. Fails if the configured PEM cannot be parsed.
    pub fn new(config: &SessionConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let (key, algorithm) = match &config.key {
            SessionKey::RsaPublicPem(pem) => {
                (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256)
            }
            SessionKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        match &config.issuer {
            // A configured issuer must be present, not just match when sent.
            Some(issuer) => {
                validation.set_required_spec_claims(&["exp", "sub", "iss"]);
                validation.set_issuer(&[issuer]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub"]),
        }

        Ok(Self { key, validation })
    }

    /// Validate a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Mint an HS256 session token for `email`, valid for `ttl_secs`.
pub fn sign_with_secret(
    subject: &str,
    email: &str,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign_with_secret_as(subject, email, None, secret, ttl_secs)
}

/// Like [`sign_with_secret`], stamping `iss` when `issuer` is given.
pub fn sign_with_secret_as(
    subject: &str,
    email: &str,
    issuer: Option<&str>,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: subject.to_string(),
        email: email.to_string(),
        exp: now + ttl_secs,
        iat: now,
        iss: issuer.map(str::to_string),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn secret_config() -> SessionConfig {
        SessionConfig {
            key: SessionKey::Secret(SECRET.to_string()),
            issuer: None,
        }
    }

    #[test]
    fn signed_token_round_trips() {
        let verifier = SessionVerifier::new(&secret_config()).unwrap();
        let token = sign_with_secret("user_1", "ada@example.com", SECRET, 600).unwrap();

        let claims = verifier.verify(&token).expect("token should verify");
        assert_eq!(claims.sub, "user_1");
        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_fails() {
        let verifier = SessionVerifier::new(&secret_config()).unwrap();
        // Well beyond the default 60-second leeway.
        let token = sign_with_secret("user_1", "ada@example.com", SECRET, -600).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let verifier = SessionVerifier::new(&secret_config()).unwrap();
        let token = sign_with_secret("user_1", "ada@example.com", "another-secret", 600).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn issuer_is_enforced_when_configured() {
        let config = SessionConfig {
            issuer: Some("https://auth.example.com".to_string()),
            ..secret_config()
        };
        let verifier = SessionVerifier::new(&config).unwrap();
        let token = sign_with_secret("user_1", "ada@example.com", SECRET, 600).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn matching_issuer_verifies_and_other_issuer_fails() {
        let config = SessionConfig {
            issuer: Some("https://auth.example.com".to_string()),
            ..secret_config()
        };
        let verifier = SessionVerifier::new(&config).unwrap();

        let good = sign_with_secret_as(
            "user_1",
            "ada@example.com",
            Some("https://auth.example.com"),
            SECRET,
            600,
        )
        .unwrap();
        let claims = verifier.verify(&good).expect("issuer matches");
        assert_eq!(claims.iss.as_deref(), Some("https://auth.example.com"));

        let other = sign_with_secret_as(
            "user_1",
            "ada@example.com",
            Some("https://evil.example.com"),
            SECRET,
            600,
        )
        .unwrap();
        assert!(verifier.verify(&other).is_err());
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let config = SessionConfig {
            key: SessionKey::RsaPublicPem("not a pem".to_string()),
            issuer: None,
        };
        assert!(SessionVerifier::new(&config).is_err());
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", secret_config());
        assert!(!rendered.contains(SECRET));
    }
}
