//! Attendance ledger: check-in writes, reads, reports, and deletes.

use chrono::{Duration, Local, NaiveDate};
use db::models::{
    attendance_record::{ActiveModel, Column, Entity},
    participant,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use std::collections::HashMap;
use util::{config::AppConfig, hashing, phone};

use crate::checkin_flow::{CheckinRequest, CheckinResult};
use crate::district_stats::{self, DistrictGroup};
use crate::error::ServiceError;
use crate::session_service::SessionService;
use crate::settings_service::SettingsService;

pub use db::models::attendance_record::Model as AttendanceRecord;

const CHECKED_IN_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Ledger row joined with the member's current district for the admin view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceItem {
    pub id: i64,
    pub session_id: String,
    pub session_title: String,
    pub participant_id: i64,
    pub name: String,
    pub phone: String,
    pub phone_last4: String,
    pub district: String,
    pub checked_in_at: String,
}

pub struct AttendanceService;

impl AttendanceService {
    /// Records a check-in. Every business failure becomes an `ok: false`
    /// result with a reason; only infrastructure failures surface as errors.
    pub async fn checkin<C: ConnectionTrait>(
        db: &C,
        req: &CheckinRequest,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<CheckinResult, ServiceError> {
        // The capability is the short code or the session token.
        let Some(session) = SessionService::find_for_checkin(db, &req.token).await? else {
            return Ok(CheckinResult::failure("유효하지 않은 출석 코드입니다."));
        };
        if !session.is_active() {
            return Ok(CheckinResult::failure("출석이 마감되었습니다."));
        }
        // The capability must address the session the client thinks it does.
        if session.id != req.session_id {
            return Ok(CheckinResult::failure("세션 정보가 일치하지 않습니다."));
        }

        let Some(member) = participant::Entity::find_by_id(req.participant_id)
            .one(db)
            .await?
        else {
            return Ok(CheckinResult::failure("선택한 참가자를 찾을 수 없습니다."));
        };

        let simple_mode = SettingsService::simple_checkin_mode(db).await?;
        let stored_phone = if simple_mode {
            // no verification; store the masked form only
            format!("***-****-{}", member.phone_last4)
        } else {
            let normalized = phone::normalize(&req.phone);
            if normalized.is_empty() {
                return Ok(CheckinResult::failure("전화번호를 확인하세요."));
            }
            let salt = AppConfig::global().phone_hash_salt.clone();
            if hashing::sha256_hex(&normalized, &salt) != member.phone_hash {
                return Ok(CheckinResult::failure("전화번호가 일치하지 않습니다."));
            }
            normalized
        };

        if Entity::find()
            .filter(Column::SessionId.eq(&session.id))
            .filter(Column::ParticipantId.eq(member.id))
            .one(db)
            .await?
            .is_some()
        {
            return Ok(CheckinResult::failure("이미 출석 처리되었습니다."));
        }

        ActiveModel {
            session_id: Set(session.id.clone()),
            session_title: Set(session.title.clone()),
            participant_id: Set(member.id),
            name: Set(member.name.clone()),
            phone: Set(stored_phone),
            phone_last4: Set(member.phone_last4.clone()),
            checked_in_at: Set(Local::now().format(CHECKED_IN_AT_FORMAT).to_string()),
            ip: Set(ip.map(String::from)),
            user_agent: Set(user_agent.map(String::from)),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(
            session_id = %session.id,
            participant_id = member.id,
            simple_mode,
            "check-in recorded"
        );
        Ok(CheckinResult::success("출석 완료"))
    }

    /// Records, newest first, with the member's current district joined in.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        session_id: Option<&str>,
    ) -> Result<Vec<AttendanceItem>, ServiceError> {
        let mut sel = Entity::find().order_by_desc(Column::CheckedInAt);
        if let Some(sid) = session_id {
            sel = sel.filter(Column::SessionId.eq(sid));
        }
        let records = sel.all(db).await?;

        // Resolve districts for the members that still exist; deleted members
        // fall back to "".
        let participant_ids: Vec<i64> = records.iter().map(|r| r.participant_id).collect();
        let mut district_map = HashMap::<i64, String>::new();
        if !participant_ids.is_empty() {
            let members = participant::Entity::find()
                .filter(participant::Column::Id.is_in(participant_ids))
                .all(db)
                .await?;
            for m in members {
                district_map.insert(m.id, m.district);
            }
        }

        Ok(records
            .into_iter()
            .map(|r| AttendanceItem {
                district: district_map.get(&r.participant_id).cloned().unwrap_or_default(),
                id: r.id,
                session_id: r.session_id,
                session_title: r.session_title,
                participant_id: r.participant_id,
                name: r.name,
                phone: r.phone,
                phone_last4: r.phone_last4,
                checked_in_at: r.checked_in_at,
            })
            .collect())
    }

    pub async fn count_for_session<C: ConnectionTrait>(
        db: &C,
        session_id: &str,
    ) -> Result<u64, ServiceError> {
        Ok(Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .count(db)
            .await?)
    }

    /// District attendance report, optionally narrowed to one session.
    pub async fn district_report<C: ConnectionTrait>(
        db: &C,
        session_id: Option<&str>,
    ) -> Result<Vec<DistrictGroup>, ServiceError> {
        let roster = participant::Entity::find().all(db).await?;
        let mut sel = Entity::find();
        if let Some(sid) = session_id {
            sel = sel.filter(Column::SessionId.eq(sid));
        }
        let records = sel.all(db).await?;
        let attended = district_stats::attended_ids(&records, None);
        Ok(district_stats::aggregate_by_district(&roster, &attended))
    }

    /// Deletes records in the caller-facing **inclusive** `[start, end]` date
    /// range. The repository-level interval is half-open, so the end boundary
    /// is shifted to the day after before the delete runs.
    pub async fn delete_by_date_range<C: ConnectionTrait>(
        db: &C,
        start_date: &str,
        end_date: &str,
    ) -> Result<u64, ServiceError> {
        if NaiveDate::parse_from_str(start_date, "%Y-%m-%d").is_err() {
            return Err(ServiceError::Validation(
                "날짜 형식은 YYYY-MM-DD 이어야 합니다.".into(),
            ));
        }
        let end_exclusive = Self::exclusive_end(end_date)?;

        let res = Entity::delete_many()
            .filter(Column::CheckedInAt.gte(start_date))
            .filter(Column::CheckedInAt.lt(end_exclusive))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Day-after boundary for the half-open repository delete.
    pub fn exclusive_end(end_date: &str) -> Result<String, ServiceError> {
        let date = NaiveDate::parse_from_str(end_date, "%Y-%m-%d").map_err(|_| {
            ServiceError::Validation("날짜 형식은 YYYY-MM-DD 이어야 합니다.".into())
        })?;
        Ok((date + Duration::days(1)).format("%Y-%m-%d").to_string())
    }

    pub async fn delete_by_session<C: ConnectionTrait>(
        db: &C,
        session_id: &str,
    ) -> Result<u64, ServiceError> {
        let res = Entity::delete_many()
            .filter(Column::SessionId.eq(session_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Retention sweep: drops records strictly older than the cutoff.
    pub async fn delete_older_than<C: ConnectionTrait>(
        db: &C,
        cutoff: &str,
    ) -> Result<u64, ServiceError> {
        let res = Entity::delete_many()
            .filter(Column::CheckedInAt.lt(cutoff))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusive_end_is_the_day_after() {
        assert_eq!(
            AttendanceService::exclusive_end("2024-01-31").unwrap(),
            "2024-02-01"
        );
        assert_eq!(
            AttendanceService::exclusive_end("2024-02-28").unwrap(),
            "2024-02-29" // 2024 is a leap year
        );
        assert_eq!(
            AttendanceService::exclusive_end("2024-12-31").unwrap(),
            "2025-01-01"
        );
    }

    #[test]
    fn exclusive_end_rejects_malformed_dates() {
        assert!(AttendanceService::exclusive_end("2024/01/31").is_err());
        assert!(AttendanceService::exclusive_end("").is_err());
    }
}
