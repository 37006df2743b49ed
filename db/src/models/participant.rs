use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Roster member in the `participants` table.
///
/// `phone` is the normalized number (digits only) and is admin-only; public
/// surfaces must expose the derived `phone_last4` instead. `phone_hash` and
/// `phone_last4` are projections of `phone` computed at creation time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub phone_hash: String,
    pub phone_last4: String,
    /// Empty string when not provided.
    pub baptismal_name: String,
    /// Empty string when the member is not assigned to a district.
    pub district: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Attendances,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}
