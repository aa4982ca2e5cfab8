//! HTTP API integration tests — exercise the workflow endpoints against
//! the in-memory store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use pagia_config::ServerConfig;

fn setup() -> axum::Router {
    let config = ServerConfig::default();
    pagia_server::build_router(&config)
}

/// Helper to read the full body bytes from a response.
async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Create a workflow and return its id.
async fn create_workflow(app: &axum::Router, body: &str) -> String {
    let resp = app
        .clone()
        .oneshot(post_json("/api/workflows", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["id"].as_str().unwrap().to_string()
}

// ── Health ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup();
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// ── CRUD ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_and_get_workflow() {
    let app = setup();
    let id = create_workflow(
        &app,
        r#"{"name":"deploy","description":"ship it","nodes":[{"id":"a"}],"edges":[]}"#,
    )
    .await;

    let req = Request::get(format!("/api/workflows/{id}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["name"], "deploy");
    assert_eq!(json["description"], "ship it");
    assert_eq!(json["nodes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_requires_name() {
    let app = setup();
    let resp = app
        .oneshot(post_json("/api/workflows", r#"{"name":"  "}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_workflows() {
    let app = setup();
    create_workflow(&app, r#"{"name":"first"}"#).await;
    create_workflow(&app, r#"{"name":"second"}"#).await;

    let req = Request::get("/api/workflows").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    let names: Vec<&str> = list.iter().map(|w| w["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"first"));
    assert!(names.contains(&"second"));
    assert_eq!(list[0]["valid"], true);
}

#[tokio::test]
async fn test_update_workflow() {
    let app = setup();
    let id = create_workflow(&app, r#"{"name":"before"}"#).await;

    let req = Request::put(format!("/api/workflows/{id}"))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"after"}"#))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["name"], "after");
    assert_eq!(json["id"], id.as_str());
}

#[tokio::test]
async fn test_update_missing_workflow() {
    let app = setup();
    let req = Request::put("/api/workflows/nope")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"x"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_workflow() {
    let app = setup();
    let id = create_workflow(&app, r#"{"name":"doomed"}"#).await;

    let req = Request::delete(format!("/api/workflows/{id}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = Request::get(format!("/api/workflows/{id}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_workflow() {
    let app = setup();
    let req = Request::get("/api/workflows/missing")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Validation & run ───────────────────────────────────────────

#[tokio::test]
async fn test_validate_reports_dangling_edge() {
    let app = setup();
    let id = create_workflow(
        &app,
        r#"{"name":"broken","nodes":[{"id":"a"}],"edges":[{"from":"a","to":"ghost"}]}"#,
    )
    .await;

    let resp = app
        .oneshot(post_json(&format!("/api/workflows/{id}/validate"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["valid"], false);
    assert!(json["errors"][0].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_run_accepts_valid_workflow() {
    let app = setup();
    let id = create_workflow(
        &app,
        r#"{"name":"ok","nodes":[{"id":"a"},{"id":"b"}],"edges":[{"from":"a","to":"b"}]}"#,
    )
    .await;

    let resp = app
        .oneshot(post_json(&format!("/api/workflows/{id}/run"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "accepted");
    assert_eq!(json["workflow_id"], id.as_str());
    assert!(json["run_id"].is_string());
}

#[tokio::test]
async fn test_run_rejects_invalid_workflow() {
    let app = setup();
    let id = create_workflow(
        &app,
        r#"{"name":"bad","nodes":[{"id":"a"},{"id":"a"}]}"#,
    )
    .await;

    let resp = app
        .oneshot(post_json(&format!("/api/workflows/{id}/run"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(resp).await;
    assert!(json["errors"][0].as_str().unwrap().contains("duplicate"));
}

#[tokio::test]
async fn test_run_missing_workflow() {
    let app = setup();
    let resp = app
        .oneshot(post_json("/api/workflows/missing/run", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
