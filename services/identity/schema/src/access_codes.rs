use sea_orm::entity::prelude::*;

/// One-time access code binding a clinical resource to a target email.
///
/// State is derived, never stored: active while `consumed_at` is null and
/// `expires_at` is in the future. Consumed rows are kept as audit tombstones.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "access_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub resource_type: String,
    pub resource_id: String,
    /// Email the code was issued for; redemption must present the same address.
    pub email: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub consumed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
