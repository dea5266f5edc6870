//! Stock Lookup API Routes
//!
//! On-demand vector analysis for a single ticker symbol.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use vector_core::StockReport;

use crate::{ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/stocks/:symbol", get(lookup_stock))
}

async fn lookup_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<StockReport>, ApiError> {
    let symbol = symbol.trim();
    if !is_valid_symbol(symbol) {
        return Err(ApiError::BadRequest("Stock symbol is required".to_string()));
    }

    let report = state
        .orchestrator
        .lookup(symbol)
        .await
        .map_err(|e| ApiError::from_vector(e, state.config.detailed_errors))?;

    Ok(Json(report))
}

/// Ticker shape check: 1–10 chars, alphanumeric plus the '.'/'-' used by
/// share classes (BRK.B, BF-B). Rejected symbols never reach the provider.
fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol.len() <= 10
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_ticker_shapes() {
        assert!(is_valid_symbol("AAPL"));
        assert!(is_valid_symbol("aapl"));
        assert!(is_valid_symbol("BRK.B"));
        assert!(is_valid_symbol("BF-B"));
        assert!(is_valid_symbol("A"));
    }

    #[test]
    fn rejects_malformed_symbols() {
        assert!(!is_valid_symbol(""));
        assert!(!is_valid_symbol("TOOLONGSYMBOL"));
        assert!(!is_valid_symbol("AAPL;DROP"));
        assert!(!is_valid_symbol("AA PL"));
        assert!(!is_valid_symbol("AAPL\u{e9}"));
    }
}
