//! Session validation port for bearer tokens.
//!
//! The HTTP middleware hands the raw token to this port and gets back the
//! caller identity. Token issuance lives outside this service.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature and expiry
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::MissingIdentity` when no positive `user_id` is present
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token (without the "Bearer " prefix) and return the caller.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
