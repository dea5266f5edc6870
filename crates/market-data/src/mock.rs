//! Deterministic mock market data for demo deployments and tests.
//!
//! When a vendor feed is down or unconfigured, the symbol's hash seeds a
//! stable set of plausible figures so repeated lookups agree with each
//! other. Random jitter is confined to intraday price noise and never
//! reaches the scoring engine's inputs of record.

use crate::{FundamentalsBlock, QuoteBlock};
use chrono::Utc;
use rand::Rng;
use vector_core::NewsItem;

/// Stable 31-based string hash (non-negative)
pub fn symbol_hash(symbol: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in symbol.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as i32);
    }
    hash.unsigned_abs()
}

pub fn quote(symbol: &str) -> QuoteBlock {
    let hash = symbol_hash(symbol);
    let base_price = 50.0 + (hash % 200) as f64;

    let mut rng = rand::thread_rng();
    let change = (rng.gen::<f64>() - 0.5) * 10.0;

    QuoteBlock {
        price: base_price,
        change,
        change_percent: (change / base_price) * 100.0,
        volume: rng.gen_range(0..10_000_000),
        previous_close: base_price - change,
        high: base_price + rng.gen::<f64>() * 5.0,
        low: base_price - rng.gen::<f64>() * 5.0,
        open: base_price + (rng.gen::<f64>() - 0.5) * 2.0,
    }
}

pub fn fundamentals(symbol: &str) -> FundamentalsBlock {
    let hash = symbol_hash(symbol);

    FundamentalsBlock {
        market_cap: Some((hash % 500 + 50) as f64 * 1e9),
        pe_ratio: Some((hash % 30 + 10) as f64),
        revenue_growth: Some((hash % 40) as f64 / 100.0 - 0.05),
        earnings_growth: Some((hash % 50) as f64 / 100.0 - 0.10),
        operating_margin: Some((hash % 30 + 5) as f64 / 100.0),
        net_margin: Some((hash % 25 + 2) as f64 / 100.0),
        roe: Some((hash % 25 + 5) as f64 / 100.0),
        return_on_assets: Some((hash % 15 + 2) as f64 / 100.0),
        debt_to_equity: Some((hash % 200) as f64 / 100.0),
        current_ratio: Some((hash % 300 + 100) as f64 / 100.0),
        beta: Some((hash % 150 + 50) as f64 / 100.0),
        week52_high: None,
        week52_low: None,
        volatility: Some((hash % 40 + 20) as f64 / 100.0),
        sector: Some("Technology".to_string()),
        industry: Some("Software".to_string()),
    }
}

pub fn news(symbol: &str) -> Vec<NewsItem> {
    vec![NewsItem {
        headline: format!("{} Reports Strong Quarterly Results", symbol),
        summary: "Company beats earnings expectations with robust growth".to_string(),
        url: "#".to_string(),
        source: "Financial Times".to_string(),
        datetime: Utc::now(),
        sentiment: 0.8,
    }]
}
