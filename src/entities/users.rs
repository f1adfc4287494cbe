use sea_orm::entity::prelude::*;

use crate::domain::Role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usr")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name
    pub name: String,

    #[sea_orm(unique)]
    pub username: String,

    /// Argon2id password hash
    pub password: String,

    pub role: Role,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
