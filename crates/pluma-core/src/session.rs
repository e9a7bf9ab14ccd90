//! Identity Provider seam
//!
//! Sign-in/sign-up and friends live in an external service; the core only
//! consumes the resulting session (a stable user id plus the user-chosen
//! display name). The CLI builds a local session from its configured
//! profile instead of talking to a provider.

use async_trait::async_trait;
use thiserror::Error;

use crate::ident::generate_id;

/// An authenticated (or local) user session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Stable user id
    pub user_id: String,
    /// User-chosen display name
    pub display_name: String,
}

impl Session {
    /// Build a session for a purely local profile
    pub fn local(display_name: impl Into<String>) -> Self {
        Self {
            user_id: generate_id("user"),
            display_name: display_name.into(),
        }
    }
}

/// Errors from the Identity Provider
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account already exists for {0}")]
    AlreadyExists(String),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// External authentication service, keyed by email
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;

    async fn request_password_reset(&self, email: &str) -> Result<(), IdentityError>;

    async fn update_password(&self, new_password: &str) -> Result<(), IdentityError>;
}
