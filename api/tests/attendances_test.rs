mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tower::ServiceExt;

use db::models::attendance_record;
use services::participant_service::{CreateParticipant, ParticipantService};

use helpers::app::{admin_bearer, body_json, body_text, make_test_app};

async fn seed_member(db: &DatabaseConnection, name: &str, phone: &str, district: &str) -> i64 {
    ParticipantService::add(
        db,
        CreateParticipant {
            name: name.to_string(),
            phone: phone.to_string(),
            baptismal_name: None,
            district: Some(district.to_string()),
        },
    )
    .await
    .expect("seed member")
    .id
}

async fn seed_record(
    db: &DatabaseConnection,
    session_id: &str,
    participant_id: i64,
    name: &str,
    checked_in_at: &str,
) {
    attendance_record::ActiveModel {
        session_id: Set(session_id.to_string()),
        session_title: Set(format!("{session_id} 세션")),
        participant_id: Set(participant_id),
        name: Set(name.to_string()),
        phone: Set("01012345678".to_string()),
        phone_last4: Set("5678".to_string()),
        checked_in_at: Set(checked_in_at.to_string()),
        ip: Set(None),
        user_agent: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed record");
}

fn admin_req(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", admin_bearer())
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn list_joins_district_and_filters_by_session() {
    let (app, db) = make_test_app().await;
    let hong = seed_member(&db, "홍길동", "010-1111-1111", "1구역").await;
    let kim = seed_member(&db, "김철수", "010-2222-2222", "2구역").await;
    seed_record(&db, "sess-a", hong, "홍길동", "2024-01-07 09:30").await;
    seed_record(&db, "sess-b", kim, "김철수", "2024-01-07 10:30").await;

    let res = app
        .clone()
        .oneshot(admin_req("GET", "/api/admin/attendances"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // newest first
    assert_eq!(rows[0]["name"], "김철수");
    assert_eq!(rows[0]["district"], "2구역");
    assert_eq!(rows[1]["district"], "1구역");

    let res = app
        .oneshot(admin_req("GET", "/api/admin/attendances?sessionId=sess-a"))
        .await
        .unwrap();
    let body = body_json(res).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "홍길동");
}

#[tokio::test]
async fn date_range_delete_keeps_the_last_day_inclusive() {
    let (app, db) = make_test_app().await;
    let id = seed_member(&db, "홍길동", "010-1111-1111", "").await;
    seed_record(&db, "a", id, "홍길동", "2024-01-01 09:00").await;
    seed_record(&db, "b", id, "홍길동", "2024-01-31 23:59").await;
    seed_record(&db, "c", id, "홍길동", "2024-02-01 00:00").await;

    let res = app
        .oneshot(admin_req(
            "DELETE",
            "/api/admin/attendances?startDate=2024-01-01&endDate=2024-01-31",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["success"], true);
    // the whole last day is inside the range...
    assert_eq!(body["deleted"], 2);

    // ...and the first moment of the next day is not
    let remaining = attendance_record::Entity::find().all(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].checked_in_at, "2024-02-01 00:00");
}

#[tokio::test]
async fn delete_by_session_removes_only_that_session() {
    let (app, db) = make_test_app().await;
    let id = seed_member(&db, "홍길동", "010-1111-1111", "").await;
    seed_record(&db, "sess-a", id, "홍길동", "2024-01-07 09:00").await;
    seed_record(&db, "sess-b", id, "홍길동", "2024-01-14 09:00").await;

    let res = app
        .oneshot(admin_req("DELETE", "/api/admin/attendances?sessionId=sess-a"))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 1);

    let remaining = attendance_record::Entity::find().all(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].session_id, "sess-b");
}

#[tokio::test]
async fn delete_without_criteria_reports_failure_uniformly() {
    let (app, _db) = make_test_app().await;

    let res = app
        .oneshot(admin_req("DELETE", "/api/admin/attendances"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["deleted"], 0);
    assert_eq!(
        body["message"],
        "삭제 조건을 지정해주세요 (sessionId 또는 startDate/endDate)"
    );
}

#[tokio::test]
async fn delete_with_malformed_dates_reports_failure_uniformly() {
    let (app, _db) = make_test_app().await;

    let res = app
        .oneshot(admin_req(
            "DELETE",
            "/api/admin/attendances?startDate=2024-01-01&endDate=bad",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["deleted"], 0);
}

#[tokio::test]
async fn district_report_narrows_to_one_session() {
    let (app, db) = make_test_app().await;
    let hong = seed_member(&db, "홍길동", "010-1111-1111", "1구역").await;
    let kim = seed_member(&db, "김철수", "010-2222-2222", "1구역").await;
    let _park = seed_member(&db, "박영희", "010-3333-3333", "").await;
    seed_record(&db, "sess-a", hong, "홍길동", "2024-01-07 09:00").await;
    seed_record(&db, "sess-b", kim, "김철수", "2024-01-14 09:00").await;

    // all sessions: both members of 1구역 attended something
    let res = app
        .clone()
        .oneshot(admin_req("GET", "/api/admin/attendances/stats/by-district"))
        .await
        .unwrap();
    let body = body_json(res).await;
    let groups = body.as_array().unwrap();
    assert_eq!(groups[0]["district"], "1구역");
    assert_eq!(groups[0]["total"], 2);
    assert_eq!(groups[0]["attended"], 2);
    assert_eq!(groups[0]["percent"], 100);
    // unassigned bucket always last
    assert_eq!(groups.last().unwrap()["district"], "미배정");
    assert_eq!(groups.last().unwrap()["attended"], 0);

    // narrowed to one session the attended set shrinks
    let res = app
        .oneshot(admin_req(
            "GET",
            "/api/admin/attendances/stats/by-district?sessionId=sess-a",
        ))
        .await
        .unwrap();
    let body = body_json(res).await;
    let groups = body.as_array().unwrap();
    assert_eq!(groups[0]["attended"], 1);
    assert_eq!(groups[0]["percent"], 50);
    let members = groups[0]["members"].as_array().unwrap();
    // attended member sorts first
    assert_eq!(members[0]["name"], "홍길동");
    assert_eq!(members[0]["attended"], true);
    assert_eq!(members[1]["attended"], false);
}

#[tokio::test]
async fn export_produces_csv_with_header() {
    let (app, db) = make_test_app().await;
    let id = seed_member(&db, "홍길동", "010-1111-1111", "1구역").await;
    seed_record(&db, "sess-a", id, "홍길동", "2024-01-07 09:00").await;

    let res = app
        .oneshot(admin_req("GET", "/api/admin/attendances/export.csv"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let text = body_text(res).await;
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), "이름,전화번호,구역,출석 시간,세션");
    assert!(lines.next().unwrap().starts_with("홍길동,"));
}

#[tokio::test]
async fn count_reports_per_session() {
    let (app, db) = make_test_app().await;
    let id = seed_member(&db, "홍길동", "010-1111-1111", "").await;
    seed_record(&db, "sess-a", id, "홍길동", "2024-01-07 09:00").await;

    let res = app
        .oneshot(admin_req("GET", "/api/admin/attendances/count?sessionId=sess-a"))
        .await
        .unwrap();
    assert_eq!(body_json(res).await, serde_json::json!(1));
}

#[tokio::test]
async fn cleanup_status_reports_disabled_by_default() {
    let (app, _db) = make_test_app().await;

    let res = app
        .oneshot(admin_req("GET", "/api/admin/attendances/cleanup/status"))
        .await
        .unwrap();
    let body = body_json(res).await;
    assert_eq!(body["enabled"], false);
    assert_eq!(body["retentionDays"], 0);
}
