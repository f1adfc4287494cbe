//! `SeaORM` implementation of the `UserService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::user::{NewUser, User, UserDetails};
use crate::services::user_service::{AuthError, AuthenticatedUser, UserService};
use async_trait::async_trait;
use tracing::{debug, info};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserDetails>, AuthError> {
        Ok(self.store.get_user_by_username(username).await?)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, AuthError> {
        let Some(details) = self.find_by_username(username).await? else {
            debug!("Authentication failed: unknown user");
            return Ok(None);
        };

        if !self.store.verify_user_password(&details, password).await? {
            debug!("Authentication failed: bad password for {username}");
            return Ok(None);
        }

        Ok(Some(AuthenticatedUser::from(details.user)))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AuthError> {
        if new_user.username.trim().is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        if new_user.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }
        if self.find_by_username(&new_user.username).await?.is_some() {
            return Err(AuthError::Validation(format!(
                "Username '{}' is already taken",
                new_user.username
            )));
        }

        let user = self.store.create_user(new_user, &self.security).await?;
        info!("Created user {} with role {}", user.username, user.role);
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.store.list_users().await?)
    }
}
