use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Duplicate emails are allowed on purpose: registering twice with the same
/// address creates two independent rows, and login resolves the first match
/// in storage order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const ROLE_VISITOR: &str = "visitor";
pub const ROLE_ADMIN: &str = "admin";
