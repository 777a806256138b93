use crate::{
    actions::Action,
    config::Config,
    errors::{into_response, AppError},
    tools::{exec::ActionRunner, ping::Pinger, read_file::FileReader},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub pinger: Arc<Pinger>,
    pub reader: Arc<FileReader>,
    pub runner: Arc<ActionRunner>,
}

impl AppState {
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let pinger = Pinger::new(&cfg)?;
        let reader = FileReader::new(&cfg);
        let runner = ActionRunner::new(&cfg);
        Ok(Self {
            cfg: Arc::new(cfg),
            pinger: Arc::new(pinger),
            reader: Arc::new(reader),
            runner: Arc::new(runner),
        })
    }
}

pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr: std::net::SocketAddr =
        format!("{}:{}", state.cfg.server.bind_addr, state.cfg.server.port).parse()?;
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let limit_bytes = state.cfg.limits.max_request_kb * 1024;
    Router::new()
        .route("/healthz", get(health))
        .route("/ping", get(ping))
        .route("/readfile", get(readfile))
        .route(
            "/exec",
            post(exec).layer(RequestBodyLimitLayer::new(limit_bytes)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status":"ok"})))
}

#[derive(Debug, Deserialize)]
struct PingQuery {
    ip: Option<String>,
}

async fn ping(State(state): State<AppState>, Query(q): Query<PingQuery>) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let Some(host) = q.ip else {
        return deny(&request_id, "ping", AppError::InvalidInput, started);
    };
    match state.pinger.ping(&host).await {
        Ok(out) => {
            tracing::debug!(
                request_id = %request_id,
                duration_ms = out.duration_ms,
                truncated = out.truncated,
                "ping complete"
            );
            audit(&request_id, "ping", "allow", "OK", started.elapsed().as_millis() as u64);
            (
                StatusCode::OK,
                Json(json!({
                    "returncode": out.returncode,
                    "stdout": out.stdout,
                    "stderr": out.stderr,
                })),
            )
                .into_response()
        }
        Err(e) => deny(&request_id, "ping", e, started),
    }
}

#[derive(Debug, Deserialize)]
struct ReadFileQuery {
    file: Option<String>,
}

async fn readfile(State(state): State<AppState>, Query(q): Query<ReadFileQuery>) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let Some(name) = q.file else {
        return deny(&request_id, "readfile", AppError::InvalidInput, started);
    };
    match state.reader.read(&name) {
        Ok(preview) => {
            audit(&request_id, "readfile", "allow", "OK", started.elapsed().as_millis() as u64);
            (
                StatusCode::OK,
                Json(json!({"filename": name, "content_preview": preview})),
            )
                .into_response()
        }
        Err(e) => deny(&request_id, "readfile", e, started),
    }
}

#[derive(Debug, Deserialize)]
struct ExecRequest {
    action: String,
}

async fn exec(State(state): State<AppState>, Json(req): Json<ExecRequest>) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let action: Action = match req.action.parse() {
        Ok(a) => a,
        Err(e) => return deny(&request_id, "exec", e, started),
    };
    match state.runner.run(action).await {
        Ok(output) => {
            audit(&request_id, "exec", "allow", "OK", started.elapsed().as_millis() as u64);
            (StatusCode::OK, Json(json!({"output": output}))).into_response()
        }
        Err(e) => deny(&request_id, "exec", e, started),
    }
}

fn deny(request_id: &str, endpoint: &str, err: AppError, started: Instant) -> Response {
    let decision = if err.status().is_server_error() { "error" } else { "deny" };
    audit(request_id, endpoint, decision, err.code(), started.elapsed().as_millis() as u64);
    into_response(err).into_response()
}

fn audit(request_id: &str, endpoint: &str, decision: &str, code: &str, duration_ms: u64) {
    tracing::info!(
        request_id = request_id,
        endpoint = endpoint,
        decision = decision,
        code = code,
        duration_ms = duration_ms,
        "audit"
    );
}
