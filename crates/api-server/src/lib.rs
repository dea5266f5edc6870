//! VectorIQ HTTP layer.
//!
//! Two public surfaces: on-demand stock lookup and the bearer-protected
//! scheduled market update, plus an unauthenticated health check. All
//! business logic lives in the orchestrator; this crate only maps HTTP
//! to it and back.

pub mod config;
mod stock_routes;
mod update_routes;

pub use config::ServerConfig;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use market_data::MarketDataClient;
use serde_json::json;
use std::sync::Arc;
use stock_cache::{MemoryReportCache, RedisReportCache};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use vector_core::{MarketDataProvider, ReportCache, VectorError};
use vector_orchestrator::{BatchRefresher, LookupOrchestrator};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<LookupOrchestrator>,
    pub refresher: Arc<BatchRefresher>,
    pub config: Arc<ServerConfig>,
}

/// HTTP-facing errors
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Unauthorized,
    Internal { detail: Option<String> },
}

impl ApiError {
    /// Map an orchestrator error; upstream detail is exposed only when
    /// the deployment opts into detailed errors.
    pub fn from_vector(err: VectorError, detailed_errors: bool) -> Self {
        match err {
            VectorError::InvalidSymbol(s) => ApiError::BadRequest(format!("Invalid symbol: {}", s)),
            VectorError::SymbolNotFound(_) => ApiError::NotFound,
            VectorError::Unauthorized => ApiError::Unauthorized,
            other => {
                tracing::error!("Stock lookup error: {}", other);
                ApiError::Internal {
                    detail: detailed_errors.then(|| other.to_string()),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Stock not found" }),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Unauthorized" }),
            ),
            ApiError::Internal { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal server error",
                    "message": detail.unwrap_or_else(|| "Failed to analyze stock".to_string()),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api_server=info,vector_orchestrator=info,market_data=warn".into()
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = build_state(config.clone()).await?;

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("VectorIQ API listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wire up collaborators from config: market data client, report cache
/// (Redis when configured, in-process otherwise), orchestrator, refresher.
pub async fn build_state(config: ServerConfig) -> anyhow::Result<AppState> {
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(MarketDataClient::new(config.market_data.clone()));

    let cache: Arc<dyn ReportCache> = match &config.redis_url {
        Some(url) => Arc::new(RedisReportCache::connect(url).await?),
        None => {
            tracing::warn!("REDIS_URL not set, using in-process report cache");
            Arc::new(MemoryReportCache::new())
        }
    };

    Ok(assemble_state(config, provider, cache))
}

/// State with an injected provider and the in-process cache. Test harnesses
/// use this to script provider behavior.
pub fn build_state_with(config: ServerConfig, provider: Arc<dyn MarketDataProvider>) -> AppState {
    assemble_state(config, provider, Arc::new(MemoryReportCache::new()))
}

fn assemble_state(
    config: ServerConfig,
    provider: Arc<dyn MarketDataProvider>,
    cache: Arc<dyn ReportCache>,
) -> AppState {
    let orchestrator = Arc::new(LookupOrchestrator::new(provider, cache));
    let refresher = Arc::new(BatchRefresher::new(
        orchestrator.clone(),
        config.watchlist.clone(),
    ));

    AppState {
        orchestrator,
        refresher,
        config: Arc::new(config),
    }
}

pub fn router(state: AppState) -> Router {
    // The dashboard is served from another origin; mirror its permissive
    // CORS policy here.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(stock_routes::routes())
        .merge(update_routes::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
