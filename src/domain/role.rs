//! Authorization roles attached to users.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of authorization levels.
///
/// Stored in the `usr.role` column by name. Each role grants exactly one
/// authority token, see [`Role::authority`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[sea_orm(string_value = "ADMIN")]
    #[serde(alias = "admin")]
    Admin,
    #[sea_orm(string_value = "USER")]
    #[serde(alias = "user")]
    User,
}

impl Role {
    /// The granted authority token for this role.
    #[must_use]
    pub const fn authority(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.authority())
    }
}

#[derive(Debug, Error)]
#[error("Unknown role '{0}', expected one of: admin, user")]
pub struct RoleParseError(String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}
