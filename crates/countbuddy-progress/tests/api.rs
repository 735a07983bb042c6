//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use countbuddy_progress::{router, MemoryProgressStore};

fn app() -> Router {
    router(Arc::new(MemoryProgressStore::new()))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn create_returns_defaults() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/api/kids", Some(json!({"kidName": "Sam"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kidName"], "Sam");
    assert_eq!(body["countingLevel"], 1);
    assert_eq!(body["tapLevel"], 1);
    assert_eq!(body["totalSessions"], 0);
    assert_eq!(body["totalCorrect"], 0);
    assert!(body["lastPlayed"].is_string());
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn create_validates_name() {
    let app = app();
    for payload in [json!({}), json!({"kidName": "   "})] {
        let (status, body) = call(&app, Method::POST, "/api/kids", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "validation");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/kids")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let app = app();
    call(&app, Method::POST, "/api/kids", Some(json!({"kidName": "Sam"}))).await;
    let (status, body) = call(&app, Method::POST, "/api/kids", Some(json!({"kidName": "Sam"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "duplicate");
}

#[tokio::test]
async fn get_by_id_and_missing() {
    let app = app();
    let (_, created) = call(&app, Method::POST, "/api/kids", Some(json!({"kidName": "Sam"}))).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = call(&app, Method::GET, &format!("/api/kids/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = call(&app, Method::GET, &format!("/api/kids/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Kid not found");
    assert_eq!(body["kind"], "not_found");

    let (status, _) = call(&app, Method::GET, "/api/kids/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn progress_update_applies_subset_and_reorders_list() {
    let app = app();
    let (_, ana) = call(&app, Method::POST, "/api/kids", Some(json!({"kidName": "Ana"}))).await;
    call(&app, Method::POST, "/api/kids", Some(json!({"kidName": "Ben"}))).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let uri = format!("/api/kids/{}/progress", ana["id"].as_str().unwrap());
    let (status, updated) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"countingLevel": 4, "totalCorrect": 12})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["countingLevel"], 4);
    assert_eq!(updated["totalCorrect"], 12);
    assert_eq!(updated["tapLevel"], 1);
    assert_eq!(updated["totalSessions"], 0);
    assert_ne!(updated["lastPlayed"], ana["lastPlayed"]);

    let (status, list) = call(&app, Method::GET, "/api/kids", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["kidName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Ana", "Ben"]);
}

#[tokio::test]
async fn progress_update_for_missing_kid_is_404() {
    let app = app();
    let uri = format!("/api/kids/{}/progress", uuid::Uuid::new_v4());
    let (status, body) = call(&app, Method::PUT, &uri, Some(json!({"tapLevel": 2}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn negative_levels_are_rejected() {
    let app = app();
    let (_, sam) = call(&app, Method::POST, "/api/kids", Some(json!({"kidName": "Sam"}))).await;
    let uri = format!("/api/kids/{}/progress", sam["id"].as_str().unwrap());
    let (status, body) = call(&app, Method::PUT, &uri, Some(json!({"tapLevel": -1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}
