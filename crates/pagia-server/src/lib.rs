//! # pagia-server
//!
//! REST API for managing workflow definitions. Definitions are stored in
//! memory and validated structurally; the `/run` endpoint acknowledges a
//! request without executing anything — there is no workflow engine
//! behind it.

pub mod store;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use pagia_config::ServerConfig;
use store::{ValidationReport, WorkflowDefinition, WorkflowStore, validate};

/// Shared server state.
pub struct AppState {
    pub store: WorkflowStore,
    started_at: Instant,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_secs: u64,
}

/// Create/update request body. The server assigns ids and timestamps.
#[derive(Deserialize)]
struct WorkflowRequest {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    nodes: Vec<store::WorkflowNode>,
    #[serde(default)]
    edges: Vec<store::WorkflowEdge>,
}

/// Compact listing entry.
#[derive(Serialize)]
struct WorkflowSummary {
    id: String,
    name: String,
    description: String,
    nodes: usize,
    edges: usize,
    valid: bool,
}

/// Acknowledgement returned by the run stub.
#[derive(Serialize)]
struct RunAccepted {
    run_id: String,
    workflow_id: String,
    status: String,
}

/// Build the axum router.
pub fn build_router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        store: WorkflowStore::new(),
        started_at: Instant::now(),
    });

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/workflows",
            get(list_workflows_handler).post(create_workflow_handler),
        )
        .route(
            "/api/workflows/{id}",
            get(get_workflow_handler)
                .put(update_workflow_handler)
                .delete(delete_workflow_handler),
        )
        .route("/api/workflows/{id}/validate", post(validate_workflow_handler))
        .route("/api/workflows/{id}/run", post(run_workflow_handler))
        .with_state(state);

    if config.cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

/// Bind and serve until the process exits.
pub async fn serve(config: ServerConfig) -> pagia_core::Result<()> {
    let listen = config.listen();
    let router = build_router(&config);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| pagia_core::PagiaError::Server(format!("failed to bind {listen}: {e}")))?;

    info!(%listen, "workflow API listening");
    axum::serve(listener, router)
        .await
        .map_err(|e| pagia_core::PagiaError::Server(e.to_string()))
}

// ── Handlers ───────────────────────────────────────────────────

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

async fn list_workflows_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<WorkflowSummary>> {
    let summaries = state
        .store
        .list()
        .into_iter()
        .map(|def| WorkflowSummary {
            valid: validate(&def).valid,
            nodes: def.nodes.len(),
            edges: def.edges.len(),
            id: def.id,
            name: def.name,
            description: def.description,
        })
        .collect();
    Json(summaries)
}

async fn create_workflow_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkflowRequest>,
) -> Result<(StatusCode, Json<WorkflowDefinition>), (StatusCode, String)> {
    if req.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "workflow name is required".into()));
    }

    let now = Utc::now();
    let def = WorkflowDefinition {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        description: req.description,
        nodes: req.nodes,
        edges: req.edges,
        created_at: now,
        updated_at: now,
    };
    info!(workflow = %def.id, name = %def.name, "workflow created");
    state.store.insert(def.clone());
    Ok((StatusCode::CREATED, Json(def)))
}

async fn get_workflow_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkflowDefinition>, StatusCode> {
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_workflow_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<WorkflowRequest>,
) -> Result<Json<WorkflowDefinition>, (StatusCode, String)> {
    if req.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "workflow name is required".into()));
    }

    let existing = state
        .store
        .get(&id)
        .ok_or((StatusCode::NOT_FOUND, "workflow not found".into()))?;

    let def = WorkflowDefinition {
        id: existing.id,
        name: req.name,
        description: req.description,
        nodes: req.nodes,
        edges: req.edges,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };
    state.store.insert(def.clone());
    Ok(Json(def))
}

async fn delete_workflow_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    match state.store.remove(&id) {
        Some(_) => {
            info!(workflow = %id, "workflow deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn validate_workflow_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ValidationReport>, StatusCode> {
    state
        .store
        .get(&id)
        .map(|def| Json(validate(&def)))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Accepts the run request after validation and does nothing else —
/// execution is out of scope for this server.
async fn run_workflow_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RunAccepted>), (StatusCode, Json<serde_json::Value>)> {
    let def = state.store.get(&id).ok_or((
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "workflow not found" })),
    ))?;

    let report = validate(&def);
    if !report.valid {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": "workflow is invalid", "errors": report.errors })),
        ));
    }

    info!(workflow = %id, "workflow run accepted");
    Ok((
        StatusCode::ACCEPTED,
        Json(RunAccepted {
            run_id: Uuid::new_v4().to_string(),
            workflow_id: id,
            status: "accepted".into(),
        }),
    ))
}
