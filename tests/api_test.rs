//! HTTP tests driving the full router over an in-memory SQLite database.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::test_database;
use ward_admin::api::{create_router, AppState};

async fn app() -> Router {
    create_router(AppState::from_database(test_database().await))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

async fn create_patient(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({"name": name, "email": email, "role": "patient"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_create_room_returns_envelope() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/rooms",
        Some(json!({"room_number": "101A", "floor": 1, "type": "ward", "total_beds": 3})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["room_number"], "101A");
    assert_eq!(body["data"]["type"], "ward");
    assert_eq!(body["data"]["available_beds"], 3);
    assert_eq!(body["data"]["beds"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["beds"][0]["status"], "available");
}

#[tokio::test]
async fn test_invalid_room_is_unprocessable() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/rooms",
        Some(json!({"room_number": "101A", "floor": 0, "type": "ward", "total_beds": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_room_is_not_found() {
    let app = app().await;

    let uri = format!("/rooms/{}", Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_bed_management_flow() {
    let app = app().await;
    let (_, room) = send(
        &app,
        Method::POST,
        "/rooms",
        Some(json!({"room_number": "101A", "floor": 1, "type": "ward", "total_beds": 2})),
    )
    .await;
    let bed1 = room["data"]["beds"][0]["id"].as_str().unwrap().to_string();
    let bed2 = room["data"]["beds"][1]["id"].as_str().unwrap().to_string();
    let patient = create_patient(&app, "Ahmad Faiz", "ahmad@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/beds/manage",
        Some(json!({"action": "assign", "bed_id": bed1, "patient_id": patient})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient assigned successfully");
    assert_eq!(body["data"][0]["status"], "occupied");

    let (status, body) = send(
        &app,
        Method::POST,
        "/beds/manage",
        Some(json!({"action": "transfer", "bed_id": bed1, "new_bed_id": bed2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["status"], "available");
    assert_eq!(body["data"][1]["patient_id"], patient);

    let uri = format!("/rooms/{}/beds", room["data"]["id"].as_str().unwrap());
    let (_, beds) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(beds["data"][1]["patient_name"], "Ahmad Faiz");

    let (status, body) = send(&app, Method::POST, &format!("/beds/{}/discharge", bed2), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "maintenance");
    assert_eq!(body["data"]["patient_id"], Value::Null);
}

#[tokio::test]
async fn test_manage_without_patient_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/beds/manage",
        Some(json!({"action": "assign", "bed_id": Uuid::new_v4()})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_room_with_occupant_is_a_conflict() {
    let app = app().await;
    let (_, room) = send(
        &app,
        Method::POST,
        "/rooms",
        Some(json!({"room_number": "101A", "floor": 1, "type": "icu", "total_beds": 1})),
    )
    .await;
    let room_id = room["data"]["id"].as_str().unwrap().to_string();
    let bed = room["data"]["beds"][0]["id"].as_str().unwrap().to_string();
    let patient = create_patient(&app, "Siti Hajar", "siti@example.com").await;
    send(
        &app,
        Method::PATCH,
        &format!("/beds/{}", bed),
        Some(json!({"patient_id": patient})),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, &format!("/rooms/{}", room_id), None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = send(&app, Method::DELETE, &format!("/beds/{}", bed), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unassigned_patients_are_paginated() {
    let app = app().await;
    create_patient(&app, "Aiman Waiting", "aiman@example.com").await;

    let (status, body) = send(&app, Method::GET, "/patients/unassigned?search=aiman", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Aiman Waiting");
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["per_page"], 10);
    assert_eq!(body["meta"]["total"], 1);
}

#[tokio::test]
async fn test_nurse_requires_staff_id() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Farah Nadia", "email": "farah@example.com", "role": "nurse"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_schedule_calendar() {
    let app = app().await;
    let (_, nurse) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({
            "name": "Farah Nadia",
            "email": "farah@example.com",
            "role": "nurse",
            "staff_id": "N-0042"
        })),
    )
    .await;
    let (_, room) = send(
        &app,
        Method::POST,
        "/rooms",
        Some(json!({"room_number": "101A", "floor": 1, "type": "ward", "total_beds": 1})),
    )
    .await;
    let schedule = json!({
        "nurse_id": nurse["data"]["id"],
        "room_id": room["data"]["id"],
        "shift": "night",
        "date": "2024-03-04"
    });

    let (status, body) = send(&app, Method::POST, "/schedules", Some(schedule.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "scheduled");
    assert_eq!(body["data"]["shift_time"], "11:00 PM - 7:00 AM");

    let (status, body) = send(&app, Method::POST, "/schedules", Some(schedule)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = send(
        &app,
        Method::GET,
        "/schedules?from=2024-03-01&to=2024-03-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dashboard_counters() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/rooms",
        Some(json!({"room_number": "101A", "floor": 1, "type": "ward", "total_beds": 4})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/dashboard", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rooms"], 1);
    assert_eq!(body["data"]["total_beds"], 4);
    assert_eq!(body["data"]["available_beds"], 4);
}
