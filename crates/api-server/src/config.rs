//! Server configuration.
//!
//! All environment access happens here, once, at startup; everything
//! below the HTTP layer receives explicit config values.

use market_data::MarketDataConfig;
use std::net::SocketAddr;

/// Symbols refreshed by the scheduled market update
pub const DEFAULT_WATCHLIST: &[&str] = &[
    // Technology
    "AAPL", "GOOGL", "MSFT", "NVDA", "TSLA", "META", "AMZN",
    // Finance
    "JPM", "BAC", "WFC", "GS", "MS",
    // Healthcare
    "JNJ", "PFE", "UNH", "ABBV",
    // Consumer
    "KO", "PG", "WMT", "HD", "MCD",
    // Energy
    "XOM", "CVX", "COP",
    // Crypto/Blockchain
    "COIN", "MSTR", "GBTC", "RIOT", "MARA",
    // Quantum Computing
    "QUBT", "RGTI", "IONQ", "IBM",
    // AI/Robotics
    "CRWV", "PLTR", "NET", "SNOW",
];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub redis_url: Option<String>,
    /// Shared secret for the scheduled market-update trigger
    pub cron_secret: Option<String>,
    /// Include upstream error detail in 500 bodies (off in production)
    pub detailed_errors: bool,
    pub watchlist: Vec<String>,
    pub market_data: MarketDataConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;

        let watchlist = match std::env::var("WATCHLIST") {
            Ok(raw) => parse_watchlist(&raw),
            Err(_) => DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
        };

        let market_data = MarketDataConfig {
            alpha_vantage_key: std::env::var("ALPHA_VANTAGE_API_KEY").ok(),
            finnhub_key: std::env::var("FINNHUB_API_KEY").ok(),
            ..Default::default()
        };

        Ok(Self {
            bind_addr,
            redis_url: std::env::var("REDIS_URL").ok(),
            cron_secret: std::env::var("CRON_SECRET").ok(),
            detailed_errors: std::env::var("DETAILED_ERRORS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            watchlist,
            market_data,
        })
    }
}

fn parse_watchlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchlist_parsing_trims_and_uppercases() {
        let parsed = parse_watchlist("aapl, msft ,,NVDA ");
        assert_eq!(parsed, vec!["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn default_watchlist_is_uppercase_and_nonempty() {
        assert!(!DEFAULT_WATCHLIST.is_empty());
        for symbol in DEFAULT_WATCHLIST {
            assert_eq!(*symbol, symbol.to_uppercase());
        }
    }
}
