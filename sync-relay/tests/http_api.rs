//! End-to-end HTTP behavior of the relay router.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use codesync_relay::codes::SequenceCodes;
use codesync_relay::config::Config;
use codesync_relay::http::build_router;
use codesync_relay::storage::{MemoryStorage, RecordStore, SqliteStorage};
use codesync_relay::SyncRelay;
use serde_json::{json, Value};
use std::sync::Arc;
use sync_types::SyncCode;
use tower::util::ServiceExt;

fn router_over(store: Arc<dyn RecordStore>, config: Config) -> Router {
    build_router(Arc::new(SyncRelay::new(config, store)))
}

fn memory_router() -> Router {
    router_over(Arc::new(MemoryStorage::new()), Config::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let body = body.map_or_else(Body::empty, |text| Body::from(text.to_string()));
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(app: &Router, body: &str) -> String {
    let response = send(app, Method::POST, "/sync", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ack = json_body(response).await;
    assert_eq!(ack["message"], "Created");
    ack["syncCode"].as_str().unwrap().to_string()
}

async fn bench_squat_scenario(app: Router) {
    let code = create(&app, r#"{"exercise":"bench"}"#).await;
    assert_eq!(code.len(), 6);
    assert!(SyncCode::parse(&code).unwrap().is_canonical());

    let response = send(&app, Method::GET, &format!("/sync/{code}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");
    let first = json_body(response).await;
    assert_eq!(first["exercise"], "bench");
    assert_eq!(first["syncCode"], code.as_str());
    assert_eq!(first["createdAt"], first["updatedAt"]);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/sync/{code}"),
        Some(r#"{"exercise":"squat"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "syncCode": code, "message": "Updated" })
    );

    let second = json_body(send(&app, Method::GET, &format!("/sync/{code}"), None).await).await;
    assert_eq!(second["exercise"], "squat");
    assert_eq!(second["syncCode"], code.as_str());
    assert_eq!(second["createdAt"], first["createdAt"]);
    assert_ne!(second["updatedAt"], first["updatedAt"]);
    assert_eq!(second.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn bench_then_squat_over_memory_store() {
    bench_squat_scenario(memory_router()).await;
}

#[tokio::test]
async fn bench_then_squat_over_sqlite_store() {
    let storage = SqliteStorage::in_memory().await.unwrap();
    bench_squat_scenario(router_over(Arc::new(storage), Config::default())).await;
}

#[tokio::test]
async fn lowercase_code_in_path_is_accepted() {
    let app = memory_router();
    let code = create(&app, r#"{"a":1}"#).await;

    let response = send(
        &app,
        Method::GET,
        &format!("/sync/{}", code.to_lowercase()),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_length_code_is_400() {
    let app = memory_router();

    for uri in ["/sync/abc", "/sync/ABCDE", "/sync/ABCDEFG"] {
        let response = send(&app, Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json_body(response).await, json!({ "error": "Invalid sync code" }));

        let response = send(&app, Method::PUT, uri, Some("{}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "PUT {uri}");
    }
}

#[tokio::test]
async fn empty_code_is_400() {
    let app = memory_router();

    let response = send(&app, Method::GET, "/sync/", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid sync code" }));

    let response = send(&app, Method::PUT, "/sync/", Some(r#"{"a":1}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid sync code" }));
}

#[tokio::test]
async fn undecodable_code_is_json_400() {
    let app = memory_router();
    let uri = "/sync/%FF%FF%FF%FF%FF%FF";

    let response = send(&app, Method::GET, uri, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(json_body(response).await, json!({ "error": "Invalid sync code" }));

    let response = send(&app, Method::PUT, uri, Some("{}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid sync code" }));
}

#[tokio::test]
async fn unknown_code_is_404() {
    let app = memory_router();

    let response = send(&app, Method::GET, "/sync/ZZZZZZ", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Sync code not found" }));

    let response = send(&app, Method::PUT, "/sync/ZZZZZZ", Some(r#"{"a":1}"#)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exhausted_code_space_is_500() {
    let taken = SyncCode::parse("AAAAAA").unwrap();
    let relay = SyncRelay::new(Config::default(), Arc::new(MemoryStorage::new()))
        .with_code_source(Arc::new(SequenceCodes::new(vec![taken])));
    let app = build_router(Arc::new(relay));

    assert_eq!(create(&app, "{}").await, "AAAAAA");

    let response = send(&app, Method::POST, "/sync", Some("{}")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Could not generate unique code" })
    );
}

#[tokio::test]
async fn non_object_body_is_400() {
    let app = memory_router();

    for body in ["[1,2,3]", "42", "\"text\"", "null"] {
        let response = send(&app, Method::POST, "/sync", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Request body must be a JSON object" })
        );
    }
}

#[tokio::test]
async fn malformed_json_is_500_with_parser_message() {
    let app = memory_router();

    let response = send(&app, Method::POST, "/sync", Some("{broken")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_body_is_413() {
    let mut config = Config::default();
    config.limits.max_body_bytes = 64;
    let app = router_over(Arc::new(MemoryStorage::new()), config);

    let big = format!(r#"{{"blob":"{}"}}"#, "x".repeat(200));
    let response = send(&app, Method::POST, "/sync", Some(&big)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json_body(response).await, json!({ "error": "Request body too large" }));
}

#[tokio::test]
async fn caller_cannot_spoof_system_fields() {
    let app = memory_router();
    let code = create(
        &app,
        r#"{"syncCode":"HACKED","createdAt":"1999-01-01T00:00:00.000Z","note":"hi"}"#,
    )
    .await;

    let record = json_body(send(&app, Method::GET, &format!("/sync/{code}"), None).await).await;
    assert_eq!(record["syncCode"], code.as_str());
    assert_ne!(record["createdAt"], "1999-01-01T00:00:00.000Z");
    assert_eq!(record["note"], "hi");
}

#[tokio::test]
async fn error_responses_carry_cors_headers() {
    let app = memory_router();
    let response = send(&app, Method::GET, "/sync/abc", None).await;

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.headers()["content-type"], "application/json");
}

#[tokio::test]
async fn concurrent_creates_get_distinct_codes() {
    let app = memory_router();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { create(&app, &format!(r#"{{"n":{i}}}"#)).await })
        })
        .collect();

    let mut codes = std::collections::HashSet::new();
    for handle in handles {
        assert!(codes.insert(handle.await.unwrap()));
    }
    assert_eq!(codes.len(), 20);
}
