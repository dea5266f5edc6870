//! Watchlist batch refresh driver.
//!
//! Fixed-window rate limiting: the watchlist is split into groups of five,
//! members of a group refresh concurrently, and the driver sleeps a full
//! second between groups (never after the last). One symbol failing is
//! recorded and must not disturb the rest of the run.

use crate::LookupOrchestrator;
use std::sync::Arc;
use std::time::Duration;
use vector_core::{BatchResult, FailedSymbol, VectorError};

/// Symbols refreshed concurrently per group
pub const BATCH_SIZE: usize = 5;
/// Pause between groups, for upstream rate limits
pub const BATCH_PAUSE: Duration = Duration::from_secs(1);

pub struct BatchRefresher {
    orchestrator: Arc<LookupOrchestrator>,
    watchlist: Vec<String>,
}

impl BatchRefresher {
    pub fn new(orchestrator: Arc<LookupOrchestrator>, watchlist: Vec<String>) -> Self {
        Self {
            orchestrator,
            watchlist,
        }
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    /// Refresh every watchlist symbol, accumulating per-symbol outcomes.
    ///
    /// Errs only when the run cannot start at all; symbol failures land in
    /// `BatchResult::failed` and the run still counts as a success.
    pub async fn run(&self) -> Result<BatchResult, VectorError> {
        if self.watchlist.is_empty() {
            return Err(VectorError::Internal(
                "refresh watchlist is empty".to_string(),
            ));
        }

        tracing::info!("Starting market update for {} stocks", self.watchlist.len());
        let started = tokio::time::Instant::now();
        let mut result = BatchResult::new();

        let groups: Vec<&[String]> = self.watchlist.chunks(BATCH_SIZE).collect();
        let group_count = groups.len();

        for (i, group) in groups.into_iter().enumerate() {
            let outcomes = futures_util::future::join_all(group.iter().map(|symbol| async move {
                (symbol.clone(), self.orchestrator.refresh(symbol).await)
            }))
            .await;

            for (symbol, outcome) in outcomes {
                match outcome {
                    Ok(report) => {
                        tracing::info!(
                            "Updated {}: ${:.2} ({})",
                            symbol,
                            report.price,
                            report.vector_score
                        );
                        result.success += 1;
                        result.updated.push(symbol);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to update {}: {}", symbol, e);
                        result.errors += 1;
                        result.failed.push(FailedSymbol {
                            symbol,
                            error: e.to_string(),
                        });
                    }
                }
            }

            if i + 1 < group_count {
                tokio::time::sleep(BATCH_PAUSE).await;
            }
        }

        result.duration = started.elapsed();
        tracing::info!(
            "Market update completed in {}ms. Success: {}, Errors: {}",
            result.duration.as_millis(),
            result.success,
            result.errors
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use vector_core::{FinancialSnapshot, MarketDataProvider};

    struct FlakyProvider {
        failing: HashSet<String>,
    }

    #[async_trait]
    impl MarketDataProvider for FlakyProvider {
        async fn fetch_snapshot(&self, symbol: &str) -> Result<FinancialSnapshot, VectorError> {
            if self.failing.contains(symbol) {
                return Err(VectorError::Provider(format!(
                    "upstream timeout for {}",
                    symbol
                )));
            }
            let mut data = FinancialSnapshot::new(symbol);
            data.price = 100.0;
            Ok(data)
        }
    }

    fn watchlist(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("SYM{}", i)).collect()
    }

    fn refresher(symbols: Vec<String>, failing: &[&str]) -> BatchRefresher {
        let provider = Arc::new(FlakyProvider {
            failing: failing.iter().map(|s| s.to_string()).collect(),
        });
        let orchestrator = Arc::new(LookupOrchestrator::new(
            provider,
            Arc::new(stock_cache::MemoryReportCache::new()),
        ));
        BatchRefresher::new(orchestrator, symbols)
    }

    #[tokio::test(start_paused = true)]
    async fn isolates_single_failure_and_paces_groups() {
        // 12 symbols -> 3 groups of (5, 5, 2) -> exactly 2 inter-group pauses
        let refresher = refresher(watchlist(12), &["SYM7"]);
        let result = refresher.run().await.unwrap();

        assert_eq!(result.success, 11);
        assert_eq!(result.errors, 1);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].symbol, "SYM7");
        assert!(result.failed[0].error.contains("upstream timeout"));
        assert_eq!(result.updated.len(), 11);
        assert!(!result.updated.contains(&"SYM7".to_string()));

        // Paused clock: elapsed time is exactly the two pacing sleeps
        assert_eq!(result.duration, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn single_group_run_never_pauses() {
        let refresher = refresher(watchlist(5), &[]);
        let result = refresher.run().await.unwrap();

        assert_eq!(result.success, 5);
        assert_eq!(result.duration, Duration::ZERO);
    }

    #[tokio::test]
    async fn updated_list_preserves_watchlist_order() {
        let refresher = refresher(watchlist(7), &[]);
        let result = refresher.run().await.unwrap();

        assert_eq!(result.updated, watchlist(7));
    }

    #[tokio::test]
    async fn all_failures_still_complete_the_run() {
        let symbols = watchlist(3);
        let failing: Vec<&str> = vec!["SYM0", "SYM1", "SYM2"];
        let refresher = refresher(symbols, &failing);
        let result = refresher.run().await.unwrap();

        assert_eq!(result.success, 0);
        assert_eq!(result.errors, 3);
        assert_eq!(result.failed.len(), 3);
    }

    #[tokio::test]
    async fn empty_watchlist_is_a_setup_error() {
        let refresher = refresher(Vec::new(), &[]);
        assert!(matches!(
            refresher.run().await,
            Err(VectorError::Internal(_))
        ));
    }
}
