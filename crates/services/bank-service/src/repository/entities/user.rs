//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub is_email_verified: bool,
    pub password_changed_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            username: model.username,
            hashed_password: model.hashed_password,
            full_name: model.full_name,
            email: model.email,
            is_email_verified: model.is_email_verified,
            password_changed_at: model.password_changed_at,
            created_at: model.created_at,
        }
    }
}
