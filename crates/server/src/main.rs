use std::{net::SocketAddr, sync::Arc};

use analytics::AnalyticsContext;
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use dataset::LoadedDataset;
use shared::{
    error::ApiError,
    protocol::{DashboardLayout, DatasetSummary, UpdateRequest, UpdateResponse},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod callbacks;
mod config;
mod figures;
mod layout;

use app_state::AppState;
use callbacks::{CallbackRegistry, ControlValues};
use config::load_settings;

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let source = dataset::source_from_str(&settings.dataset_source);
    let loaded = dataset::load(source.as_ref()).await.map_err(|error| {
        error!(
            source = %settings.dataset_source,
            error = %format!("{error:#}"),
            "failed to load launch dataset; dashboard cannot start"
        );
        error
    })?;

    let state = app_state_from(loaded);
    let app = build_router(Arc::new(state), settings.max_update_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn app_state_from(loaded: LoadedDataset) -> AppState {
    let dataset = DatasetSummary {
        source: loaded.source,
        records: loaded.table.len(),
        skipped_rows: loaded.skipped_rows,
        sites: loaded.table.distinct_sites(),
        payload_bounds: loaded.table.payload_bounds(),
        loaded_at: loaded.loaded_at,
    };
    AppState {
        analytics: AnalyticsContext::new(loaded.table),
        callbacks: Arc::new(CallbackRegistry::dashboard()),
        dataset,
    }
}

fn build_router(state: Arc<AppState>, max_update_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/layout", get(http_layout))
        .route("/api/dataset", get(http_dataset))
        .route("/api/update", post(http_update))
        .layer(RequestBodyLimitLayer::new(max_update_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_layout(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(layout::dashboard_layout(&state.analytics))
}

async fn http_dataset(State(state): State<Arc<AppState>>) -> Json<DatasetSummary> {
    Json(state.dataset.clone())
}

async fn http_update(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, (StatusCode, Json<ApiError>)> {
    let values = ControlValues {
        site: req.site,
        payload: req.payload,
    };
    debug!(
        changed = ?req.changed,
        site = %values.site,
        low = values.payload.low,
        high = values.payload.high,
        "dispatching control update"
    );

    let response = state
        .callbacks
        .dispatch(&state.analytics, &req.changed, &values)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiError::from(e))))?;
    Ok(Json(response))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
