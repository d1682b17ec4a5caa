use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use typeahead_core::{
    BuildOutcome, ChangeEvent, EngineConfig, IndexStats, InvalidationListener, JsonCatalog, SearchEngine, SearchError,
    SearchResult, SledCache,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Catalog file or directory of `.json`/`.jsonl` records.
    pub catalog: PathBuf,
    /// sled directory backing the snapshot cache.
    pub cache_dir: PathBuf,
    pub engine: EngineConfig,
    pub admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub limit: usize,
    /// Comma-separated category filter.
    #[serde(default)]
    pub categories: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Deserialize)]
pub struct RebuildParams {
    #[serde(default)]
    pub force: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub listener: Arc<InvalidationListener>,
    pub admin_token: Option<String>,
}

/// Open the sled cache and catalog and create the engine, restoring a cached snapshot if present.
pub fn build_engine(config: &ServerConfig) -> Result<Arc<SearchEngine>> {
    let cache = SledCache::open(&config.cache_dir)?;
    let source = JsonCatalog::new(&config.catalog);
    Ok(Arc::new(SearchEngine::new(Arc::new(source), Arc::new(cache), config.engine.clone())))
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let engine = build_engine(&config)?;
    Ok(router(engine, config.admin_token))
}

pub fn router(engine: Arc<SearchEngine>, admin_token: Option<String>) -> Router {
    let listener = Arc::new(InvalidationListener::new(engine.clone()));
    let app_state = AppState { engine, listener, admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .route("/admin/rebuild", post(rebuild_handler))
        .route("/admin/clear", post(clear_handler))
        .route("/admin/notify", post(notify_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn parse_categories(raw: Option<&str>) -> Option<HashSet<String>> {
    let set: HashSet<String> =
        raw?.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect();
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let categories = parse_categories(params.categories.as_deref());
    let engine = state.engine.clone();
    let query = params.q.clone();
    // a cold index builds inside the query, which scans the catalog on this thread
    let results = tokio::task::spawn_blocking(move || engine.search(&query, params.limit, categories.as_ref()))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "search task failed");
            Vec::new()
        });
    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results })
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.engine.stats())
}

async fn rebuild_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RebuildParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let engine = state.engine.clone();
    let started = std::time::Instant::now();
    let outcome = tokio::task::spawn_blocking(move || engine.build_index(params.force))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(error_status)?;
    let outcome = match outcome {
        BuildOutcome::AlreadyLoaded => serde_json::json!({ "outcome": "already_loaded" }),
        BuildOutcome::FromCache => serde_json::json!({ "outcome": "from_cache" }),
        BuildOutcome::Built(report) => serde_json::json!({
            "outcome": "built",
            "items": report.items,
            "parts": report.parts,
            "entries": report.entries,
        }),
    };
    Ok(Json(serde_json::json!({
        "result": outcome,
        "took_s": started.elapsed().as_secs_f64(),
        "stats": state.engine.stats(),
    })))
}

async fn clear_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<IndexStats>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let engine = state.engine.clone();
    // waits on the persist lock, which a finishing build holds while writing the cache
    tokio::task::spawn_blocking(move || engine.clear_cache())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(error_status)?;
    Ok(Json(state.engine.stats()))
}

async fn notify_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<ChangeEvent>,
) -> Result<StatusCode, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let listener = state.listener.clone();
    tokio::task::spawn_blocking(move || listener.on_change(&event))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(error_status)?;
    Ok(StatusCode::ACCEPTED)
}

fn error_status(e: SearchError) -> (StatusCode, String) {
    let status = if e.is_retriable() { StatusCode::SERVICE_UNAVAILABLE } else { StatusCode::INTERNAL_SERVER_ERROR };
    (status, e.to_string())
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
