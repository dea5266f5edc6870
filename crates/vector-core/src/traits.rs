use crate::{FinancialSnapshot, StockReport, VectorError};
use async_trait::async_trait;
use std::time::Duration;

/// Trait for market data providers
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch a point-in-time snapshot for a symbol.
    ///
    /// Returns `VectorError::SymbolNotFound` when the provider has no data
    /// for the ticker.
    async fn fetch_snapshot(&self, symbol: &str) -> Result<FinancialSnapshot, VectorError>;
}

/// Trait for the per-symbol report cache (key-value with per-key TTL)
#[async_trait]
pub trait ReportCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<StockReport>, VectorError>;

    async fn set(&self, key: &str, report: &StockReport, ttl: Duration)
        -> Result<(), VectorError>;
}
