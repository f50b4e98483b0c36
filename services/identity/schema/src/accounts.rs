use sea_orm::entity::prelude::*;

/// Login account, optionally linked to exactly one clinical resource.
///
/// `email` is stored case-preserving; a unique index on `lower(email)`
/// enforces case-insensitive uniqueness, and lookups lower-case both sides.
/// `(resource_type, resource_id)` carries a unique index so a clinical
/// resource can never be linked to two accounts.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Argon2id PHC string. Never logged.
    pub password_hash: String,
    pub role: i16,
    pub status: i16,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
