use serde::Serialize;

use crate::domain::Role;
use crate::entities::users;

/// User data returned from the repository, without the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub role: Role,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

/// Credential record used by the authentication layer.
#[derive(Debug, Clone)]
pub struct UserDetails {
    pub user: User,
    pub password_hash: String,
}

impl From<users::Model> for UserDetails {
    fn from(model: users::Model) -> Self {
        let password_hash = model.password.clone();
        Self {
            user: User::from(model),
            password_hash,
        }
    }
}

/// Input for creating a user. `password` is plain text and gets hashed
/// before it reaches the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}
