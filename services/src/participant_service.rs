//! Roster management: search, add, remove, bulk import.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use db::models::participant::{ActiveModel, Column, Entity};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use util::{config::AppConfig, hashing, phone};

use crate::checkin_flow::ParticipantSearchItem;
use crate::error::ServiceError;
use crate::roster_csv::RosterRow;

pub use db::models::participant::Model as Participant;

pub const SEARCH_LIMIT_DEFAULT: u64 = 10;
pub const SEARCH_LIMIT_MAX: u64 = 20;

#[derive(Debug, Clone)]
pub struct CreateParticipant {
    pub name: String,
    pub phone: String,
    pub baptismal_name: Option<String>,
    pub district: Option<String>,
}

/// Outcome of a bulk import. Bad rows are counted, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_rows: i64,
    pub inserted: i64,
    pub skipped: i64,
}

pub struct ParticipantService;

impl ParticipantService {
    /// Name-prefix search for the public check-in surface.
    ///
    /// A blank query returns an empty list without touching the database.
    /// Results are masked: callers only ever see the last four phone digits.
    pub async fn search<C: ConnectionTrait>(
        db: &C,
        query: &str,
        limit: u64,
    ) -> Result<Vec<ParticipantSearchItem>, ServiceError> {
        let keyword = query.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        let limit = limit.clamp(1, SEARCH_LIMIT_MAX);

        let rows = Entity::find()
            .filter(Column::Name.starts_with(keyword))
            .order_by_asc(Column::Name)
            .limit(limit)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(Self::to_search_item).collect())
    }

    /// Full roster for the admin view, full phone included.
    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Participant>, ServiceError> {
        Ok(Entity::find().order_by_asc(Column::Name).all(db).await?)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<Participant>, ServiceError> {
        Ok(Entity::find_by_id(id).one(db).await?)
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, ServiceError> {
        Ok(Entity::find().count(db).await?)
    }

    pub async fn add<C: ConnectionTrait>(
        db: &C,
        req: CreateParticipant,
    ) -> Result<Participant, ServiceError> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::Validation("이름을 입력해주세요.".into()));
        }
        let phone_norm = phone::normalize(&req.phone);
        if phone_norm.is_empty() {
            return Err(ServiceError::Validation(
                "올바른 전화번호를 입력해주세요.".into(),
            ));
        }

        let phone_hash = Self::hash_phone(&phone_norm);
        if Self::find_duplicate(db, &name, &phone_hash).await?.is_some() {
            return Err(ServiceError::Conflict("이미 등록된 신자입니다.".into()));
        }

        let row = Self::build(
            name,
            phone_norm,
            phone_hash,
            req.baptismal_name.unwrap_or_default(),
            req.district.unwrap_or_default(),
        )
        .insert(db)
        .await?;
        Ok(row)
    }

    /// Strict delete: removing an id that does not exist is a failure, not a
    /// silent no-op.
    pub async fn remove<C: ConnectionTrait>(db: &C, id: i64) -> Result<(), ServiceError> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound(
                "등록된 신자를 찾을 수 없습니다.".into(),
            ));
        }
        Ok(())
    }

    /// Bulk roster import. With `replace_all` the existing roster is wiped
    /// first — the route requires explicit confirmation before calling this.
    ///
    /// Rows are skipped (never fatal) when required cells are blank, when the
    /// file repeats the same name/phone, or when the member already exists.
    pub async fn import<C: ConnectionTrait>(
        db: &C,
        rows: &[RosterRow],
        replace_all: bool,
    ) -> Result<ImportSummary, ServiceError> {
        if replace_all {
            Entity::delete_many().exec(db).await?;
        }

        let mut inserted = 0i64;
        let mut skipped = 0i64;
        let mut seen: HashSet<String> = HashSet::new();

        for row in rows {
            let name = row.name.trim().to_string();
            let phone_norm = phone::normalize(&row.phone);
            if name.is_empty() || phone_norm.is_empty() {
                skipped += 1;
                continue;
            }

            // duplicates inside the same file
            if !seen.insert(format!("{name}|{phone_norm}")) {
                skipped += 1;
                continue;
            }

            let phone_hash = Self::hash_phone(&phone_norm);
            if Self::find_duplicate(db, &name, &phone_hash).await?.is_some() {
                skipped += 1;
                continue;
            }

            Self::build(
                name,
                phone_norm,
                phone_hash,
                row.baptismal_name.trim().to_string(),
                row.district.trim().to_string(),
            )
            .insert(db)
            .await?;
            inserted += 1;
        }

        tracing::info!(
            total = rows.len(),
            inserted,
            skipped,
            replace_all,
            "roster import finished"
        );

        Ok(ImportSummary {
            total_rows: rows.len() as i64,
            inserted,
            skipped,
        })
    }

    /// Member count per district; members without one fall under the
    /// aggregator's reserved bucket.
    pub async fn stats_by_district<C: ConnectionTrait>(
        db: &C,
    ) -> Result<BTreeMap<String, i64>, ServiceError> {
        let rows = Entity::find().all(db).await?;
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for p in rows {
            let district = match p.district.trim() {
                "" => crate::district_stats::UNASSIGNED_DISTRICT.to_string(),
                d => d.to_string(),
            };
            *counts.entry(district).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn to_search_item(p: Participant) -> ParticipantSearchItem {
        ParticipantSearchItem {
            id: p.id,
            name: p.name,
            phone_last4: p.phone_last4,
            baptismal_name: p.baptismal_name,
            district: p.district,
        }
    }

    async fn find_duplicate<C: ConnectionTrait>(
        db: &C,
        name: &str,
        phone_hash: &str,
    ) -> Result<Option<Participant>, ServiceError> {
        Ok(Entity::find()
            .filter(Column::Name.eq(name))
            .filter(Column::PhoneHash.eq(phone_hash))
            .one(db)
            .await?)
    }

    fn hash_phone(phone_norm: &str) -> String {
        let salt = AppConfig::global().phone_hash_salt.clone();
        hashing::sha256_hex(phone_norm, &salt)
    }

    // The only place participant rows are constructed: hash and last4 are
    // always derived from the normalized phone and cannot diverge from it.
    fn build(
        name: String,
        phone_norm: String,
        phone_hash: String,
        baptismal_name: String,
        district: String,
    ) -> ActiveModel {
        let phone_last4 = phone::last4(&phone_norm);
        ActiveModel {
            name: Set(name),
            phone: Set(phone_norm),
            phone_hash: Set(phone_hash),
            phone_last4: Set(phone_last4),
            baptismal_name: Set(baptismal_name),
            district: Set(district),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
    }
}
