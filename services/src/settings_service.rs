//! Key-value application settings.
//!
//! Read-mostly and process-wide; the check-in flow reads the simple-mode flag
//! once at flow start, admin writes take effect on the next read.

use std::collections::HashMap;

use db::models::setting::{ActiveModel, Column, Entity};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait, Set};

use crate::error::ServiceError;

pub const KEY_CHURCH_NAME: &str = "church_name";
pub const KEY_SIMPLE_CHECKIN_MODE: &str = "simple_checkin_mode";
pub const KEY_LOGO_URL: &str = "logo_url";

const ALLOWED_KEYS: [&str; 3] = [KEY_CHURCH_NAME, KEY_SIMPLE_CHECKIN_MODE, KEY_LOGO_URL];

pub struct SettingsService;

impl SettingsService {
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        key: &str,
    ) -> Result<Option<String>, ServiceError> {
        Ok(Entity::find_by_id(key).one(db).await?.map(|s| s.value))
    }

    pub async fn get_all<C: ConnectionTrait>(
        db: &C,
    ) -> Result<HashMap<String, String>, ServiceError> {
        Ok(Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.key, s.value))
            .collect())
    }

    /// Upserts one of the known keys; anything else is rejected.
    pub async fn set<C: ConnectionTrait>(
        db: &C,
        key: &str,
        value: &str,
    ) -> Result<(), ServiceError> {
        if !ALLOWED_KEYS.contains(&key) {
            return Err(ServiceError::Validation(format!(
                "알 수 없는 설정 키입니다: {key}"
            )));
        }

        Entity::insert(ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        })
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_column(Column::Value)
                .to_owned(),
        )
        .exec(db)
        .await?;
        Ok(())
    }

    pub async fn church_name<C: ConnectionTrait>(db: &C) -> Result<String, ServiceError> {
        Ok(Self::get(db, KEY_CHURCH_NAME)
            .await?
            .unwrap_or_else(|| "성당".to_string()))
    }

    /// Simple mode skips phone verification on check-in. Off unless the
    /// stored value is exactly `"true"`.
    pub async fn simple_checkin_mode<C: ConnectionTrait>(db: &C) -> Result<bool, ServiceError> {
        Ok(Self::get(db, KEY_SIMPLE_CHECKIN_MODE).await?.as_deref() == Some("true"))
    }
}
