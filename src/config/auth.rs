//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length accepted in production
const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret the token issuer signs with
    pub jwt_secret: SecretString,

    /// Expected `iss` claim; unchecked when absent
    #[serde(default)]
    pub issuer: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, the secret must be at least 32 bytes long.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::WeakJwtSecret);
        }
        if matches!(&self.issuer, Some(iss) if iss.trim().is_empty()) {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        Ok(())
    }
}
