use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Check-in session in the `sessions` table.
///
/// `id` is a human-readable string (`<date>-<slug>`). `token` is the
/// submission capability handed out by the admin QR endpoint; `short_code` is
/// the public code that doubles as the capability when checking in via a
/// short link. Public lookups must never return `token`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub session_date: String,
    pub starts_at: String,
    pub ends_at: String,
    pub token: String,
    pub short_code: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

/// Session lifecycle. ACTIVE transitions to CLOSED exactly once; there is no
/// reopening.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "session_status")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "ACTIVE")]
    #[serde(rename = "ACTIVE")]
    Active,

    #[sea_orm(string_value = "CLOSED")]
    #[serde(rename = "CLOSED")]
    Closed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}
