//! Authentication types for the domain layer.
//!
//! These types represent the caller identity extracted from a bearer token.
//! They carry no provider dependencies; whatever issues the tokens, the
//! `SessionValidator` port turns them into an [`AuthenticatedUser`].

use super::UserId;
use thiserror::Error;

/// Caller identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The numeric user identifier from the `user_id` claim.
    pub id: UserId,

    /// Username claim, when the issuer provides one.
    pub username: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, username: Option<String>) -> Self {
        Self { id, username }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The token verified but carries no usable user identity.
    #[error("Token carries no valid user identity")]
    MissingIdentity,
}

impl AuthError {
    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
