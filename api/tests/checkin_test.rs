mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::json;
use tower::ServiceExt;

use db::models::attendance_record;
use services::participant_service::{CreateParticipant, Participant, ParticipantService};
use services::session_service::{CreateSession, Session, SessionService};
use services::settings_service::SettingsService;

use helpers::app::{body_json, make_test_app, with_connect_info};

async fn seed_member(db: &DatabaseConnection, name: &str, phone: &str) -> Participant {
    ParticipantService::add(
        db,
        CreateParticipant {
            name: name.to_string(),
            phone: phone.to_string(),
            baptismal_name: None,
            district: Some("1구역".to_string()),
        },
    )
    .await
    .expect("seed member")
}

async fn seed_session(db: &DatabaseConnection, title: &str) -> Session {
    SessionService::create(
        db,
        CreateSession {
            title: title.to_string(),
            session_date: "2024-01-07".to_string(),
        },
    )
    .await
    .expect("seed session")
}

fn checkin_request(session_id: &str, token: &str, participant_id: i64, phone: &str) -> Request<Body> {
    let body = json!({
        "sessionId": session_id,
        "token": token,
        "participantId": participant_id,
        "phone": phone,
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/checkin")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    with_connect_info(req, [203, 0, 113, 7])
}

#[tokio::test]
async fn checkin_succeeds_with_short_code_and_matching_phone() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "홍길동", "010-1234-5678").await;
    let session = seed_session(&db, "주일 미사").await;

    // short code is case-insensitive and doubles as the capability token
    let req = checkin_request(
        &session.id,
        &session.short_code.to_lowercase(),
        member.id,
        "010 1234 5678",
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "출석 완료");

    let record = attendance_record::Entity::find()
        .filter(attendance_record::Column::SessionId.eq(&session.id))
        .one(&db)
        .await
        .unwrap()
        .expect("record written");
    assert_eq!(record.participant_id, member.id);
    assert_eq!(record.phone, "01012345678");
    assert_eq!(record.session_title, "주일 미사");
}

#[tokio::test]
async fn checkin_accepts_the_session_token_as_capability() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "김철수", "010-2345-6789").await;
    let session = seed_session(&db, "저녁 모임").await;

    let req = checkin_request(&session.id, &session.token, member.id, "01023456789");
    let res = app.oneshot(req).await.unwrap();
    let body = body_json(res).await;
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn checkin_rejects_unknown_code() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "홍길동", "010-1234-5678").await;

    let req = checkin_request("2024-01-07-없음", "ZZZZZZZZ", member.id, "01012345678");
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "유효하지 않은 출석 코드입니다.");
}

#[tokio::test]
async fn checkin_rejects_closed_session() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "홍길동", "010-1234-5678").await;
    let session = seed_session(&db, "주일 미사").await;
    SessionService::close(&db, &session.id).await.unwrap();

    let req = checkin_request(&session.id, &session.short_code, member.id, "01012345678");
    let body = body_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "출석이 마감되었습니다.");
}

#[tokio::test]
async fn checkin_rejects_session_id_mismatch() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "홍길동", "010-1234-5678").await;
    let session = seed_session(&db, "주일 미사").await;

    let req = checkin_request("다른-세션", &session.short_code, member.id, "01012345678");
    let body = body_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "세션 정보가 일치하지 않습니다.");
}

#[tokio::test]
async fn checkin_rejects_unknown_participant() {
    let (app, db) = make_test_app().await;
    let session = seed_session(&db, "주일 미사").await;

    let req = checkin_request(&session.id, &session.short_code, 9999, "01012345678");
    let body = body_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "선택한 참가자를 찾을 수 없습니다.");
}

#[tokio::test]
async fn standard_mode_requires_a_phone_number() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "홍길동", "010-1234-5678").await;
    let session = seed_session(&db, "주일 미사").await;

    let req = checkin_request(&session.id, &session.short_code, member.id, "  ");
    let body = body_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "전화번호를 확인하세요.");
}

#[tokio::test]
async fn standard_mode_rejects_a_mismatched_phone() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "홍길동", "010-1234-5678").await;
    let session = seed_session(&db, "주일 미사").await;

    let req = checkin_request(&session.id, &session.short_code, member.id, "010-9999-0000");
    let body = body_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "전화번호가 일치하지 않습니다.");
}

#[tokio::test]
async fn duplicate_checkin_is_rejected_with_a_reason() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "홍길동", "010-1234-5678").await;
    let session = seed_session(&db, "주일 미사").await;

    let req = checkin_request(&session.id, &session.short_code, member.id, "01012345678");
    let body = body_json(app.clone().oneshot(req).await.unwrap()).await;
    assert_eq!(body["ok"], true);

    let req = checkin_request(&session.id, &session.short_code, member.id, "01012345678");
    let body = body_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "이미 출석 처리되었습니다.");

    let count = attendance_record::Entity::find().all(&db).await.unwrap().len();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn simple_mode_skips_verification_and_stores_masked_phone() {
    let (app, db) = make_test_app().await;
    let member = seed_member(&db, "홍길동", "010-1234-5678").await;
    let session = seed_session(&db, "주일 미사").await;
    SettingsService::set(&db, "simple_checkin_mode", "true")
        .await
        .unwrap();

    // selection submits immediately with an empty phone value
    let req = checkin_request(&session.id, &session.short_code, member.id, "");
    let body = body_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(body["ok"], true);

    let record = attendance_record::Entity::find()
        .one(&db)
        .await
        .unwrap()
        .expect("record written");
    assert_eq!(record.phone, "***-****-5678");
}
