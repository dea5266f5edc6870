//! Single-symbol lookup orchestration.
//!
//! Composes the market data provider, the scoring engine, and the report
//! cache: serve cached analysis while it is fresh, otherwise fetch a
//! snapshot, score it, and overwrite the cache entry. One cache read, at
//! most one provider fetch, at most one cache write per lookup.

pub mod batch;

pub use batch::BatchRefresher;

use chrono::Utc;
use std::sync::Arc;
use stock_cache::{cache_key, freshness};
use vector_core::{
    Classification, FinancialSnapshot, MarketDataProvider, ReportCache, StockReport, VectorError,
};
use vector_engine::{determine_risk_level, generate_trading_signals, VectorScoreEngine};

pub struct LookupOrchestrator {
    provider: Arc<dyn MarketDataProvider>,
    cache: Arc<dyn ReportCache>,
    engine: VectorScoreEngine,
}

impl LookupOrchestrator {
    pub fn new(provider: Arc<dyn MarketDataProvider>, cache: Arc<dyn ReportCache>) -> Self {
        Self {
            provider,
            cache,
            engine: VectorScoreEngine::new(),
        }
    }

    /// On-demand lookup: cached report while fresh, recompute otherwise.
    /// The write TTL matches the current freshness window.
    pub async fn lookup(&self, symbol: &str) -> Result<StockReport, VectorError> {
        let symbol = symbol.to_uppercase();
        let key = cache_key(&symbol);
        let now = Utc::now();

        if let Some(cached) = self.cache.get(&key).await? {
            if freshness::is_fresh(cached.timestamp, now) {
                tracing::debug!("Serving {} from cache", symbol);
                return Ok(cached);
            }
        }

        tracing::info!("Fetching fresh data for {}", symbol);
        let report = self.compute(&symbol).await?;
        self.cache
            .set(&key, &report, freshness::valid_window(now))
            .await?;

        Ok(report)
    }

    /// Batch path: always recompute and write the flat next-day TTL.
    /// The scheduled refresh runs at the close, so the market-open window
    /// never applies here.
    pub async fn refresh(&self, symbol: &str) -> Result<StockReport, VectorError> {
        let symbol = symbol.to_uppercase();
        let report = self.compute(&symbol).await?;
        self.cache
            .set(&cache_key(&symbol), &report, freshness::BATCH_TTL)
            .await?;

        Ok(report)
    }

    async fn compute(&self, symbol: &str) -> Result<StockReport, VectorError> {
        let snapshot = self.provider.fetch_snapshot(symbol).await?;
        Ok(self.build_report(symbol, &snapshot))
    }

    fn build_report(&self, symbol: &str, snapshot: &FinancialSnapshot) -> StockReport {
        let analysis = self.engine.score(snapshot);
        let signals =
            generate_trading_signals(snapshot.price, snapshot.volatility, analysis.total_score);
        let risk_level = determine_risk_level(snapshot.volatility, analysis.total_score);
        let now = Utc::now();

        StockReport {
            symbol: symbol.to_string(),
            timestamp: now,
            price: snapshot.price,
            change: snapshot.change,
            change_percent: snapshot.change_percent,
            volume: snapshot.volume,
            market_cap: snapshot.market_cap,
            vector_score: analysis.total_score,
            classification: Classification::from_score(analysis.total_score),
            components: analysis.components,
            signals,
            risk_level,
            sector: snapshot
                .sector
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use stock_cache::MemoryReportCache;

    struct StaticProvider {
        fetches: AtomicUsize,
        missing: bool,
    }

    impl StaticProvider {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                missing: false,
            }
        }

        fn snapshot(symbol: &str) -> FinancialSnapshot {
            let mut data = FinancialSnapshot::new(symbol);
            data.price = 120.0;
            data.volatility = Some(0.22);
            data.revenue_growth = Some(0.18);
            data.operating_margin = Some(0.22);
            data.sector = Some("Technology".to_string());
            data
        }
    }

    #[async_trait]
    impl MarketDataProvider for StaticProvider {
        async fn fetch_snapshot(&self, symbol: &str) -> Result<FinancialSnapshot, VectorError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.missing {
                return Err(VectorError::SymbolNotFound(symbol.to_string()));
            }
            Ok(Self::snapshot(symbol))
        }
    }

    fn orchestrator(provider: Arc<StaticProvider>) -> LookupOrchestrator {
        LookupOrchestrator::new(provider, Arc::new(MemoryReportCache::new()))
    }

    #[tokio::test]
    async fn lookup_fetches_once_then_serves_cache() {
        let provider = Arc::new(StaticProvider::new());
        let orch = orchestrator(provider.clone());

        let first = orch.lookup("aapl").await.unwrap();
        assert_eq!(first.symbol, "AAPL");
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);

        let second = orch.lookup("AAPL").await.unwrap();
        assert_eq!(second.vector_score, first.vector_score);
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_entry_triggers_recompute() {
        let provider = Arc::new(StaticProvider::new());
        let cache = Arc::new(MemoryReportCache::new());
        let orch = LookupOrchestrator::new(provider.clone(), cache.clone());

        // Seed an entry older than even the closed-market window
        let mut stale = orch.refresh("MSFT").await.unwrap();
        stale.timestamp = Utc::now() - chrono::Duration::hours(25);
        cache
            .set(&cache_key("MSFT"), &stale, Duration::from_secs(600))
            .await
            .unwrap();
        let fetches_before = provider.fetches.load(Ordering::SeqCst);

        let report = orch.lookup("MSFT").await.unwrap();
        assert_eq!(provider.fetches.load(Ordering::SeqCst), fetches_before + 1);
        assert!(report.timestamp > stale.timestamp);
    }

    #[tokio::test]
    async fn missing_symbol_propagates_not_found() {
        let provider = Arc::new(StaticProvider {
            fetches: AtomicUsize::new(0),
            missing: true,
        });
        let orch = orchestrator(provider);

        let err = orch.lookup("ZZZZ").await.unwrap_err();
        assert!(matches!(err, VectorError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn repeated_scoring_is_identical_for_unchanged_snapshot() {
        let provider = Arc::new(StaticProvider::new());
        let orch = orchestrator(provider);

        let a = orch.refresh("NVDA").await.unwrap();
        let b = orch.refresh("NVDA").await.unwrap();

        // Timestamps move; the analysis must not
        assert_eq!(
            serde_json::to_string(&a.components).unwrap(),
            serde_json::to_string(&b.components).unwrap()
        );
        assert_eq!(a.vector_score, b.vector_score);
        assert_eq!(a.classification, b.classification);
        assert_eq!(a.risk_level, b.risk_level);
        assert_eq!(a.signals.stop_loss, b.signals.stop_loss);
    }

    #[tokio::test]
    async fn refresh_overwrites_the_cached_report() {
        let provider = Arc::new(StaticProvider::new());
        let cache = Arc::new(MemoryReportCache::new());
        let orch = LookupOrchestrator::new(provider, cache.clone());

        orch.refresh("GOOGL").await.unwrap();
        let first = cache.get(&cache_key("GOOGL")).await.unwrap().unwrap();

        orch.refresh("googl").await.unwrap();
        let second = cache.get(&cache_key("GOOGL")).await.unwrap().unwrap();
        assert!(second.timestamp >= first.timestamp);
    }
}
