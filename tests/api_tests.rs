//! Integration tests for the HTTP API.
//!
//! Uses actix-web's test harness against an in-memory store, without binding a socket.

use actix_web::{App, http::StatusCode, test, web::Data};
use hrms_lite::config::Config;
use hrms_lite::routes;
use hrms_lite::store::{HrmStore, MemoryStore};
use serde_json::{Value, json};
use std::sync::Arc;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STORE_BACKEND" => Some("memory".into()),
        "RATE_API_PER_MIN" => Some("0".into()),
        _ => None,
    })
    .unwrap()
}

macro_rules! test_app {
    () => {{
        let store: Arc<dyn HrmStore> = Arc::new(MemoryStore::new());
        let config = test_config();
        test::init_service(
            App::new()
                .app_data(Data::from(store))
                .configure(|cfg| routes::configure(cfg, &config)),
        )
        .await
    }};
}

fn asha() -> Value {
    json!({
        "employee_id": "EMP001",
        "full_name": "Asha Rao",
        "email": "asha@co.com",
        "department": "Engineering"
    })
}

// =============================================================================
// EMPLOYEE ENDPOINTS
// =============================================================================

#[actix_web::test]
async fn test_create_and_list_employees() {
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/employees").set_json(asha()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["employee_id"], "EMP001");
    assert_eq!(created["total_present"], 0);
    assert_eq!(created["attendance_rate"], Value::Null);

    let req = test::TestRequest::get().uri("/api/employees").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["full_name"], "Asha Rao");
}

#[actix_web::test]
async fn test_duplicate_create_returns_conflict() {
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/employees").set_json(asha()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/api/employees").set_json(asha()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Conflict");
    assert_eq!(body["message"], "Employee with ID 'EMP001' already exists");
}

#[actix_web::test]
async fn test_invalid_email_returns_validation_error() {
    let app = test_app!();

    let mut payload = asha();
    payload["email"] = json!("asha.co.com");
    let req = test::TestRequest::post().uri("/api/employees").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ValidationError");
}

#[actix_web::test]
async fn test_missing_field_returns_validation_error() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({ "employee_id": "EMP001" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ValidationError");
}

#[actix_web::test]
async fn test_get_and_delete_employee() {
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/employees").set_json(asha()).to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri("/api/attendance")
        .set_json(json!({ "employee_id": "EMP001", "date": "2026-01-05", "status": "Present" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/employees/EMP001").to_request();
    let employee: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(employee["total_present"], 1);
    assert_eq!(employee["attendance_rate"], 100);

    let req = test::TestRequest::delete().uri("/api/employees/EMP001").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Value = test::read_body_json(resp).await;
    assert_eq!(deleted["attendance_records_deleted"], 1);

    let req = test::TestRequest::get().uri("/api/employees/EMP001").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/attendance").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert!(all.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_delete_unknown_employee_returns_not_found() {
    let app = test_app!();

    let req = test::TestRequest::delete().uri("/api/employees/GHOST").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NotFound");
}

// =============================================================================
// ATTENDANCE ENDPOINTS
// =============================================================================

#[actix_web::test]
async fn test_mark_and_filter_attendance() {
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/employees").set_json(asha()).to_request();
    test::call_service(&app, req).await;

    for (date, status) in [("2026-01-05", "Present"), ("2026-01-06", "Absent")] {
        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({ "employee_id": "EMP001", "date": date, "status": status }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/attendance/EMP001").to_request();
    let history: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        history,
        json!([
            { "employee_id": "EMP001", "employee_name": "Asha Rao", "date": "2026-01-05", "status": "Present" },
            { "employee_id": "EMP001", "employee_name": "Asha Rao", "date": "2026-01-06", "status": "Absent" }
        ])
    );

    let req = test::TestRequest::get()
        .uri("/api/attendance/EMP001?date_from=2026-02-01&date_to=2026-01-01")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let inverted: Value = test::read_body_json(resp).await;
    assert_eq!(inverted, json!([]));

    let req = test::TestRequest::get()
        .uri("/api/attendance?date_from=2026-01-06")
        .to_request();
    let later: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(later.as_array().unwrap().len(), 1);
    assert_eq!(later[0]["date"], "2026-01-06");

    let req = test::TestRequest::get().uri("/api/employees/EMP001/summary").to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(summary, json!({ "total_present": 1, "total_absent": 1 }));
}

#[actix_web::test]
async fn test_mark_unknown_employee_returns_not_found() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/attendance")
        .set_json(json!({ "employee_id": "GHOST", "date": "2026-01-01", "status": "Present" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_mark_with_bad_status_returns_validation_error() {
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/employees").set_json(asha()).to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/attendance")
        .set_json(json!({ "employee_id": "EMP001", "date": "2026-01-01", "status": "Late" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ValidationError");
}

#[actix_web::test]
async fn test_mark_with_padded_date_returns_validation_error() {
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/employees").set_json(asha()).to_request();
    test::call_service(&app, req).await;

    for date in ["2026-01- 5", "+2026-1-05"] {
        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({ "employee_id": "EMP001", "date": date, "status": "Present" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{} accepted", date);
    }

    let req = test::TestRequest::get().uri("/api/attendance").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all, json!([]));
}

#[actix_web::test]
async fn test_malformed_filter_date_returns_validation_error() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/attendance?date_from=01-01-2026")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// DASHBOARD ENDPOINT
// =============================================================================

#[actix_web::test]
async fn test_dashboard_summary_for_given_date() {
    let app = test_app!();

    let req = test::TestRequest::post().uri("/api/employees").set_json(asha()).to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({
            "employee_id": "EMP002",
            "full_name": "Ravi Kumar",
            "email": "ravi@co.com",
            "department": "Sales"
        }))
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri("/api/attendance")
        .set_json(json!({ "employee_id": "EMP001", "date": "2026-01-05", "status": "Present" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard/summary?date=2026-01-05")
        .to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        summary,
        json!({
            "date": "2026-01-05",
            "total_employees": 2,
            "present_today": 1,
            "absent_today": 0,
            "not_marked_today": 1
        })
    );
}

#[actix_web::test]
async fn test_dashboard_defaults_to_today() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/dashboard/summary").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let summary: Value = test::read_body_json(resp).await;
    assert_eq!(summary["total_employees"], 0);
    assert!(summary["date"].is_string());
}
