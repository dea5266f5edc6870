//! Per-symbol report cache.
//!
//! Redis is the production backend; the in-memory backend keeps single
//! process deployments and tests off the network. Both store the report
//! as JSON under `stock:{SYMBOL}` with a per-key TTL chosen by the
//! freshness policy.

pub mod freshness;

use async_trait::async_trait;
use dashmap::DashMap;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::time::Duration;
use tokio::time::Instant;
use vector_core::{ReportCache, StockReport, VectorError};

/// Cache key for a symbol (expects the canonical uppercase form)
pub fn cache_key(symbol: &str) -> String {
    format!("stock:{}", symbol)
}

/// Redis-backed report cache
pub struct RedisReportCache {
    conn: ConnectionManager,
}

impl RedisReportCache {
    /// Connect and build a managed connection (auto-reconnects)
    pub async fn connect(url: &str) -> Result<Self, VectorError> {
        let client = Client::open(url).map_err(|e| VectorError::Cache(e.to_string()))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| VectorError::Cache(e.to_string()))?;
        tracing::info!("Connected to Redis report cache");
        Ok(Self { conn })
    }
}

#[async_trait]
impl ReportCache for RedisReportCache {
    async fn get(&self, key: &str) -> Result<Option<StockReport>, VectorError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| VectorError::Cache(e.to_string()))?;

        match value {
            Some(json) => {
                let report =
                    serde_json::from_str(&json).map_err(|e| VectorError::Cache(e.to_string()))?;
                Ok(Some(report))
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        report: &StockReport,
        ttl: Duration,
    ) -> Result<(), VectorError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(report).map_err(|e| VectorError::Cache(e.to_string()))?;
        let _: () = conn
            .set_ex(key, json, ttl.as_secs())
            .await
            .map_err(|e| VectorError::Cache(e.to_string()))?;
        Ok(())
    }
}

/// In-memory report cache with per-entry expiry
#[derive(Default)]
pub struct MemoryReportCache {
    entries: DashMap<String, MemoryEntry>,
}

struct MemoryEntry {
    report: StockReport,
    expires_at: Instant,
}

impl MemoryReportCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportCache for MemoryReportCache {
    async fn get(&self, key: &str) -> Result<Option<StockReport>, VectorError> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.report.clone()));
            }
        }
        // Expired entries are dropped lazily on the next read
        self.entries.remove(key);
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        report: &StockReport,
        ttl: Duration,
    ) -> Result<(), VectorError> {
        self.entries.insert(
            key.to_string(),
            MemoryEntry {
                report: report.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
