//! Session lifecycle: creation with short codes, close, public lookup.

use chrono::{NaiveDate, Utc};
use db::models::session::{ActiveModel, Column, Entity, Status};
use rand::{rngs::OsRng, Rng};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use util::{config::AppConfig, hashing};

use crate::error::ServiceError;

pub use db::models::session::Model as Session;

// Excludes 0/O, 1/I to keep codes readable off a projector.
pub const SHORT_CODE_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const SHORT_CODE_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct CreateSession {
    pub title: String,
    pub session_date: String,
}

pub struct SessionService;

impl SessionService {
    /// Creates an ACTIVE session.
    ///
    /// The id is `<date>-<slugified title>`, so recreating the same service
    /// on the same day conflicts. The short code doubles as the check-in
    /// capability; the stored token is its salted hash.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        req: CreateSession,
    ) -> Result<Session, ServiceError> {
        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(ServiceError::Validation("세션 제목을 입력해주세요.".into()));
        }
        if NaiveDate::parse_from_str(&req.session_date, "%Y-%m-%d").is_err() {
            return Err(ServiceError::Validation(
                "날짜 형식은 YYYY-MM-DD 이어야 합니다.".into(),
            ));
        }

        let id = format!("{}-{}", req.session_date, Self::slugify(&title));
        if Entity::find_by_id(id.as_str()).one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "이미 존재하는 세션입니다: {id}"
            )));
        }

        let short_code = Self::generate_short_code(db).await?;
        let salt = AppConfig::global().phone_hash_salt.clone();
        let token = hashing::sha256_hex(&short_code, &salt);

        let row = ActiveModel {
            id: Set(id),
            title: Set(title),
            session_date: Set(req.session_date.clone()),
            starts_at: Set(format!("{}T00:00:00", req.session_date)),
            ends_at: Set(format!("{}T23:59:59", req.session_date)),
            token: Set(token),
            short_code: Set(short_code),
            status: Set(Status::Active),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
        Ok(row)
    }

    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Session>, ServiceError> {
        Ok(Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await?)
    }

    pub async fn get<C: ConnectionTrait>(
        db: &C,
        id: &str,
    ) -> Result<Option<Session>, ServiceError> {
        Ok(Entity::find_by_id(id).one(db).await?)
    }

    /// Public lookup by short code, case-insensitive. The caller must not
    /// expose the returned row's `token`.
    pub async fn get_public_by_code<C: ConnectionTrait>(
        db: &C,
        short_code: &str,
    ) -> Result<Session, ServiceError> {
        Entity::find()
            .filter(Column::ShortCode.eq(short_code.to_uppercase()))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("유효하지 않은 코드입니다.".into()))
    }

    /// Resolves the session a submission addresses. The capability may be the
    /// short code (short-link flow) or the session token (QR flow).
    pub async fn find_for_checkin<C: ConnectionTrait>(
        db: &C,
        token_or_code: &str,
    ) -> Result<Option<Session>, ServiceError> {
        Ok(Entity::find()
            .filter(
                Condition::any()
                    .add(Column::ShortCode.eq(token_or_code.to_uppercase()))
                    .add(Column::Token.eq(token_or_code)),
            )
            .one(db)
            .await?)
    }

    /// ACTIVE → CLOSED, one way. Closing a closed session fails.
    pub async fn close<C: ConnectionTrait>(db: &C, id: &str) -> Result<Session, ServiceError> {
        let session = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("세션을 찾을 수 없습니다.".into()))?;
        if !session.is_active() {
            return Err(ServiceError::Conflict("이미 마감된 세션입니다.".into()));
        }

        let mut active: ActiveModel = session.into();
        active.status = Set(Status::Closed);
        Ok(active.update(db).await?)
    }

    pub async fn remove<C: ConnectionTrait>(db: &C, id: &str) -> Result<(), ServiceError> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound("세션을 찾을 수 없습니다.".into()));
        }
        Ok(())
    }

    /// URL the QR code and short links point at.
    pub fn checkin_url(short_code: &str) -> String {
        let base = AppConfig::global().checkin_base_url.clone();
        format!("{}/c/{}", base.trim_end_matches('/'), short_code)
    }

    /// Lowercases and keeps `[a-z0-9가-힣]`, collapsing everything else into
    /// single dashes.
    pub fn slugify(title: &str) -> String {
        let mut slug = String::new();
        for c in title.trim().to_lowercase().chars() {
            let keep = c.is_ascii_lowercase() || c.is_ascii_digit() || ('가'..='힣').contains(&c);
            if keep {
                slug.push(c);
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.trim_matches('-').to_string()
    }

    async fn generate_short_code<C: ConnectionTrait>(db: &C) -> Result<String, ServiceError> {
        loop {
            let code: String = (0..SHORT_CODE_LEN)
                .map(|_| {
                    let idx = OsRng.gen_range(0..SHORT_CODE_CHARS.len());
                    SHORT_CODE_CHARS[idx] as char
                })
                .collect();

            let taken = Entity::find()
                .filter(Column::ShortCode.eq(&code))
                .one(db)
                .await?
                .is_some();
            if !taken {
                return Ok(code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_keeps_hangul_and_collapses_punctuation() {
        assert_eq!(SessionService::slugify("주일 미사"), "주일-미사");
        assert_eq!(SessionService::slugify("  Youth!! Night  "), "youth-night");
        assert_eq!(SessionService::slugify("성경공부 (수요일)"), "성경공부-수요일");
    }

    #[test]
    fn short_code_charset_has_no_ambiguous_characters() {
        for banned in [b'0', b'O', b'1', b'I'] {
            assert!(!SHORT_CODE_CHARS.contains(&banned));
        }
        assert_eq!(SHORT_CODE_LEN, 8);
    }
}
