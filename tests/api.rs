//! End-to-end tests for the event REST API over a real HTTP socket.
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio_test::assert_ok;

use events_api::api;
use events_api::app_state::AppState;
use events_api::domain::EventRegistry;

/// Serves the API on an ephemeral port backed by an in-memory registry.
async fn spawn_app() -> SocketAddr {
    let state = AppState::new(Arc::new(EventRegistry::new()));
    let app = api::build_router().with_state(state);

    let listener = assert_ok!(tokio::net::TcpListener::bind("127.0.0.1:0").await);
    let addr = assert_ok!(listener.local_addr());
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            panic!("server failed: {err}");
        }
    });
    addr
}

fn spring_event() -> Value {
    json!({
        "name": "Spring",
        "description": "REST API Development with Spring",
        "beginEnrollmentDateTime": "2019-09-30T15:27:00",
        "closeEnrollmentDateTime": "2019-10-01T15:27:00",
        "beginEventDateTime": "2019-10-02T15:27:00",
        "endEventDateTime": "2019-10-03T15:27:00",
        "basePrice": 100,
        "maxPrice": 200,
        "limitOfEnrollment": 100,
        "location": "D2 Startup Factory"
    })
}

async fn post_event(client: &reqwest::Client, addr: SocketAddr, body: &Value) -> reqwest::Response {
    assert_ok!(
        client
            .post(format!("http://{addr}/api/events"))
            .json(body)
            .send()
            .await
    )
}

fn error_fields(body: &Value) -> Vec<&str> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("field").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn create_event_returns_created_draft_with_location() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let response = post_event(&client, addr, &spring_event()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let Some(location) = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
    else {
        panic!("missing Location header");
    };
    let body: Value = assert_ok!(response.json().await);

    let Some(id) = body.get("id").and_then(Value::as_i64) else {
        panic!("missing id in {body}");
    };
    assert_eq!(location, format!("/api/events/{id}"));
    assert_eq!(body.get("free"), Some(&json!(false)));
    assert_eq!(body.get("offline"), Some(&json!(true)));
    assert_eq!(body.get("eventStatus"), Some(&json!("DRAFT")));

    let fetched = assert_ok!(client.get(format!("http://{addr}{location}")).send().await);
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = assert_ok!(fetched.json().await);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn server_controlled_fields_are_rejected() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let mut body = spring_event();
    if let Some(object) = body.as_object_mut() {
        object.insert("id".to_string(), json!(100));
        object.insert("free".to_string(), json!(true));
        object.insert("offline".to_string(), json!(false));
        object.insert("eventStatus".to_string(), json!("PUBLISHED"));
    }

    let response = post_event(&client, addr, &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = assert_ok!(response.json().await);
    assert_eq!(body.pointer("/error/code"), Some(&json!(1002)));
}

#[tokio::test]
async fn empty_submission_is_a_bad_request() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let response = post_event(&client, addr, &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = assert_ok!(response.json().await);
    assert_eq!(body.pointer("/error/code"), Some(&json!(1001)));
    let fields = error_fields(&body);
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"endEventDateTime"));
}

#[tokio::test]
async fn wrong_input_reports_each_violation() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let mut body = spring_event();
    if let Some(object) = body.as_object_mut() {
        object.insert("endEventDateTime".to_string(), json!("2019-10-01T15:27:00"));
        object.insert("basePrice".to_string(), json!(10_000));
        object.insert("maxPrice".to_string(), json!(200));
    }

    let response = post_event(&client, addr, &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = assert_ok!(response.json().await);
    let Some(first) = body.pointer("/errors/0") else {
        panic!("no field errors in {body}");
    };
    assert_eq!(first.get("objectName"), Some(&json!("eventSubmission")));
    assert!(first.get("defaultMessage").is_some());
    assert!(first.get("code").is_some());

    let fields = error_fields(&body);
    assert!(fields.contains(&"endEventDateTime"));
    assert!(fields.contains(&"basePrice"));
    assert!(fields.contains(&"maxPrice"));
}

#[tokio::test]
async fn query_events_pages_and_sorts() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    for i in 0..30 {
        let mut body = spring_event();
        if let Some(object) = body.as_object_mut() {
            object.insert("name".to_string(), json!(format!("event{i}")));
        }
        let response = post_event(&client, addr, &body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = assert_ok!(
        client
            .get(format!("http://{addr}/api/events?page=1&size=10&sort=name,DESC"))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = assert_ok!(response.json().await);
    let Some(data) = body.get("data").and_then(Value::as_array) else {
        panic!("missing data in {body}");
    };
    assert_eq!(data.len(), 10);
    assert_eq!(body.pointer("/data/0/name"), Some(&json!("event26")));
    assert_eq!(
        body.get("page"),
        Some(&json!({"size": 10, "totalElements": 30, "totalPages": 3, "number": 1}))
    );
}

#[tokio::test]
async fn unknown_sort_property_is_a_bad_request() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let response = assert_ok!(
        client
            .get(format!("http://{addr}/api/events?sort=password"))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = assert_ok!(response.json().await);
    assert_eq!(body.pointer("/error/code"), Some(&json!(1003)));
}

#[tokio::test]
async fn missing_event_is_not_found() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let response = assert_ok!(
        client
            .get(format!("http://{addr}/api/events/183"))
            .send()
            .await
    );
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = assert_ok!(response.json().await);
    assert_eq!(body.pointer("/error/code"), Some(&json!(2001)));
}

#[tokio::test]
async fn health_reports_healthy() {
    let addr = spawn_app().await;
    let response = assert_ok!(reqwest::get(format!("http://{addr}/health")).await);
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = assert_ok!(response.json().await);
    assert_eq!(body.get("status"), Some(&json!("healthy")));
}
