//! Domain service for user lookup and authentication.

use crate::domain::Role;
use crate::models::user::{NewUser, User, UserDetails};
use thiserror::Error;

/// Errors specific to authentication operations.
///
/// A username miss is not an error; lookups return `None` instead.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// A principal that passed credential verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// The single authority granted to this principal.
    #[must_use]
    pub const fn authority(&self) -> &'static str {
        self.role.authority()
    }
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Domain service trait for users.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Resolves a username to its credential record.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserDetails>, AuthError>;

    /// Verifies credentials. Returns `None` for an unknown user or a wrong
    /// password.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, AuthError>;

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for an empty username/password or a
    /// username that is already taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, AuthError>;

    async fn list_users(&self) -> Result<Vec<User>, AuthError>;
}
