//! Market Update API Routes
//!
//! Scheduled watchlist refresh, triggered by a cron job holding the
//! shared bearer secret. Authorization happens before any work begins.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use vector_core::BatchResult;

use crate::{ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/market-update", post(run_market_update))
}

#[derive(Serialize)]
struct UpdateResponse {
    #[serde(flatten)]
    results: BatchResult,
    duration: String,
    message: String,
}

async fn run_market_update(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&headers, state.config.cron_secret.as_deref()) {
        return e.into_response();
    }

    match state.refresher.run().await {
        Ok(results) => {
            let duration = format!("{}ms", results.duration.as_millis());
            let message = format!("Updated {} stocks successfully", results.success);
            (
                StatusCode::OK,
                Json(UpdateResponse {
                    results,
                    duration,
                    message,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Market update failed: {}", e);
            // Setup failed before any symbol ran: report the empty partial
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Market update failed",
                    "message": e.to_string(),
                    "results": BatchResult::new(),
                })),
            )
                .into_response()
        }
    }
}

/// Bearer-token check against the configured cron secret. A deployment
/// without a secret keeps the trigger locked.
fn authorize(headers: &HeaderMap, secret: Option<&str>) -> Result<(), ApiError> {
    let Some(secret) = secret else {
        tracing::warn!("CRON_SECRET not configured; rejecting market update trigger");
        return Err(ApiError::Unauthorized);
    };

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if token == secret => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}
