//! Multi-vendor market data aggregation.
//!
//! One snapshot fetch fans out to four independent sub-fetches (quote,
//! fundamentals, news, analyst sentiment) and joins whichever succeeded.
//! A failed sub-fetch falls back to deterministic mock data instead of
//! failing the snapshot, so downstream scoring always has something to
//! work with in demo deployments.

pub mod mock;
pub mod sentiment;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration as StdDuration;
use vector_core::{
    AnalystSentiment, FinancialSnapshot, MarketDataProvider, NewsItem, VectorError,
};

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
const FINNHUB_URL: &str = "https://finnhub.io/api/v1";

/// Max articles attached to a snapshot
const NEWS_LIMIT: usize = 5;
/// News lookback window in days
const NEWS_LOOKBACK_DAYS: i64 = 7;

/// Vendor credentials and fetch behavior, built once at startup and passed
/// in — the client never reads the environment itself.
#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    pub alpha_vantage_key: Option<String>,
    pub finnhub_key: Option<String>,
    pub request_timeout: StdDuration,
    /// Substitute deterministic mock data when a vendor call fails.
    /// With this off, a failed quote fetch surfaces as `SymbolNotFound`.
    pub fallback_to_mock: bool,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_key: None,
            finnhub_key: None,
            request_timeout: StdDuration::from_secs(30),
            fallback_to_mock: true,
        }
    }
}

/// Price block from the quote feed
#[derive(Debug, Clone)]
pub struct QuoteBlock {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub previous_close: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
}

/// Fundamentals block from the company overview feed
#[derive(Debug, Clone, Default)]
pub struct FundamentalsBlock {
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub operating_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub roe: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub beta: Option<f64>,
    pub week52_high: Option<f64>,
    pub week52_low: Option<f64>,
    /// Direct volatility figure; only the mock generator fills this in,
    /// vendor data estimates it from the 52-week range instead
    pub volatility: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

#[derive(Clone)]
pub struct MarketDataClient {
    config: MarketDataConfig,
    client: Client,
}

impl MarketDataClient {
    pub fn new(config: MarketDataConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    fn alpha_vantage_key(&self) -> Result<&str, VectorError> {
        self.config
            .alpha_vantage_key
            .as_deref()
            .ok_or_else(|| VectorError::Provider("Alpha Vantage key not configured".to_string()))
    }

    /// Real-time quote from Alpha Vantage GLOBAL_QUOTE
    pub async fn get_quote(&self, symbol: &str) -> Result<QuoteBlock, VectorError> {
        let key = self.alpha_vantage_key()?;

        let response = self
            .client
            .get(ALPHA_VANTAGE_URL)
            .query(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol), ("apikey", key)])
            .send()
            .await
            .map_err(|e| VectorError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VectorError::Provider(format!(
                "Alpha Vantage HTTP {}",
                response.status()
            )));
        }

        let body: GlobalQuoteResponse = response
            .json()
            .await
            .map_err(|e| VectorError::Provider(e.to_string()))?;

        // An unknown ticker comes back as an empty quote object
        let quote = body
            .global_quote
            .filter(|q| q.price.is_some())
            .ok_or_else(|| VectorError::SymbolNotFound(symbol.to_string()))?;

        Ok(QuoteBlock {
            price: parse_field(&quote.price),
            change: parse_field(&quote.change),
            change_percent: parse_percent(&quote.change_percent),
            volume: quote
                .volume
                .as_deref()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            previous_close: parse_field(&quote.previous_close),
            high: parse_field(&quote.high),
            low: parse_field(&quote.low),
            open: parse_field(&quote.open),
        })
    }

    /// Company fundamentals from Alpha Vantage OVERVIEW
    pub async fn get_fundamentals(&self, symbol: &str) -> Result<FundamentalsBlock, VectorError> {
        let key = self.alpha_vantage_key()?;

        let response = self
            .client
            .get(ALPHA_VANTAGE_URL)
            .query(&[("function", "OVERVIEW"), ("symbol", symbol), ("apikey", key)])
            .send()
            .await
            .map_err(|e| VectorError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VectorError::Provider(format!(
                "Alpha Vantage HTTP {}",
                response.status()
            )));
        }

        let body: OverviewResponse = response
            .json()
            .await
            .map_err(|e| VectorError::Provider(e.to_string()))?;

        if body.symbol.is_none() {
            return Err(VectorError::SymbolNotFound(symbol.to_string()));
        }

        Ok(FundamentalsBlock {
            market_cap: parse_opt(&body.market_capitalization),
            pe_ratio: parse_opt(&body.pe_ratio),
            revenue_growth: parse_opt(&body.quarterly_revenue_growth_yoy),
            earnings_growth: parse_opt(&body.quarterly_earnings_growth_yoy),
            operating_margin: parse_opt(&body.operating_margin_ttm),
            net_margin: parse_opt(&body.profit_margin),
            roe: parse_opt(&body.return_on_equity_ttm),
            return_on_assets: parse_opt(&body.return_on_assets_ttm),
            debt_to_equity: parse_opt(&body.debt_to_equity_ratio),
            current_ratio: parse_opt(&body.current_ratio),
            beta: parse_opt(&body.beta),
            week52_high: parse_opt(&body.week52_high),
            week52_low: parse_opt(&body.week52_low),
            volatility: None,
            sector: non_empty(body.sector),
            industry: non_empty(body.industry),
        })
    }

    /// Recent company news from Finnhub, tagged with headline sentiment
    pub async fn get_news(&self, symbol: &str) -> Result<Vec<NewsItem>, VectorError> {
        let key = self
            .config
            .finnhub_key
            .as_deref()
            .ok_or_else(|| VectorError::Provider("Finnhub key not configured".to_string()))?;

        let to = Utc::now();
        let from = to - Duration::days(NEWS_LOOKBACK_DAYS);

        let query = [
            ("symbol", symbol.to_string()),
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
            ("token", key.to_string()),
        ];

        let response = self
            .client
            .get(format!("{}/company-news", FINNHUB_URL))
            .query(&query)
            .send()
            .await
            .map_err(|e| VectorError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VectorError::Provider(format!(
                "Finnhub HTTP {}",
                response.status()
            )));
        }

        let articles: Vec<FinnhubArticle> = response
            .json()
            .await
            .map_err(|e| VectorError::Provider(e.to_string()))?;

        Ok(articles
            .into_iter()
            .take(NEWS_LIMIT)
            .map(|a| {
                let text = format!("{} {}", a.headline, a.summary);
                NewsItem {
                    sentiment: sentiment::text_sentiment(&text),
                    headline: a.headline,
                    summary: a.summary,
                    url: a.url,
                    source: a.source,
                    datetime: DateTime::from_timestamp(a.datetime, 0).unwrap_or_else(Utc::now),
                }
            })
            .collect())
    }

    /// Analyst coverage block. Placeholder until a ratings vendor is wired
    /// up; async so it joins the other sub-fetches uniformly.
    async fn get_analyst_sentiment(&self, _symbol: &str) -> AnalystSentiment {
        sentiment::analyst_placeholder()
    }
}

#[async_trait]
impl MarketDataProvider for MarketDataClient {
    async fn fetch_snapshot(&self, symbol: &str) -> Result<FinancialSnapshot, VectorError> {
        let symbol = symbol.to_uppercase();

        // Independent sub-fetches: join all, keep whichever succeeded
        let (quote_result, fundamentals_result, news_result, analyst) = tokio::join!(
            self.get_quote(&symbol),
            self.get_fundamentals(&symbol),
            self.get_news(&symbol),
            self.get_analyst_sentiment(&symbol),
        );

        let quote = match quote_result {
            Ok(q) => q,
            Err(e) if self.config.fallback_to_mock => {
                tracing::warn!("Quote fetch failed for {}, using mock data: {}", symbol, e);
                mock::quote(&symbol)
            }
            Err(e) => return Err(e),
        };

        let fundamentals = match fundamentals_result {
            Ok(f) => f,
            Err(e) if self.config.fallback_to_mock => {
                tracing::warn!(
                    "Fundamentals fetch failed for {}, using mock data: {}",
                    symbol,
                    e
                );
                mock::fundamentals(&symbol)
            }
            Err(e) => {
                tracing::warn!("Fundamentals unavailable for {}: {}", symbol, e);
                FundamentalsBlock::default()
            }
        };

        let news = match news_result {
            Ok(items) => items,
            Err(e) => {
                tracing::debug!("News fetch failed for {}: {}", symbol, e);
                if self.config.fallback_to_mock {
                    mock::news(&symbol)
                } else {
                    Vec::new()
                }
            }
        };

        Ok(assemble_snapshot(&symbol, quote, fundamentals, news, analyst))
    }
}

/// Merge the sub-fetch blocks into one snapshot.
///
/// Volatility is estimated from the 52-week range relative to the current
/// price, falling back to 0.3 when the range is unavailable. Beta defaults
/// to the market's 1.0.
pub fn assemble_snapshot(
    symbol: &str,
    quote: QuoteBlock,
    fundamentals: FundamentalsBlock,
    news: Vec<NewsItem>,
    analyst: AnalystSentiment,
) -> FinancialSnapshot {
    let range_estimate = match (fundamentals.week52_high, fundamentals.week52_low) {
        (Some(high), Some(low)) if quote.price > 0.0 => Some((high - low) / quote.price),
        _ => None,
    };
    let volatility = fundamentals.volatility.or(range_estimate).or(Some(0.3));

    let mut snapshot = FinancialSnapshot::new(symbol);
    snapshot.price = quote.price;
    snapshot.change = quote.change;
    snapshot.change_percent = quote.change_percent;
    snapshot.open = quote.open;
    snapshot.high = quote.high;
    snapshot.low = quote.low;
    snapshot.previous_close = quote.previous_close;
    snapshot.volume = quote.volume;
    snapshot.market_cap = fundamentals.market_cap;
    snapshot.pe_ratio = fundamentals.pe_ratio;
    snapshot.revenue_growth = fundamentals.revenue_growth;
    snapshot.earnings_growth = fundamentals.earnings_growth;
    snapshot.operating_margin = fundamentals.operating_margin;
    snapshot.net_margin = fundamentals.net_margin;
    snapshot.roe = fundamentals.roe;
    snapshot.return_on_assets = fundamentals.return_on_assets;
    snapshot.debt_to_equity = fundamentals.debt_to_equity;
    snapshot.current_ratio = fundamentals.current_ratio;
    snapshot.beta = fundamentals.beta.or(Some(1.0));
    snapshot.volatility = volatility;
    snapshot.sector = fundamentals.sector.or_else(|| Some("Technology".to_string()));
    snapshot.industry = fundamentals.industry.or_else(|| Some("Software".to_string()));
    snapshot.news = news;
    snapshot.sentiment = Some(analyst);
    snapshot
}

fn parse_field(value: &Option<String>) -> f64 {
    value.as_deref().and_then(|v| v.parse().ok()).unwrap_or(0.0)
}

fn parse_percent(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .map(|v| v.trim_end_matches('%'))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0)
}

/// Alpha Vantage reports missing numerics as "None" or "-"
fn parse_opt(value: &Option<String>) -> Option<f64> {
    value.as_deref().and_then(|v| v.parse().ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "None")
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "02. open")]
    open: Option<String>,
    #[serde(rename = "03. high")]
    high: Option<String>,
    #[serde(rename = "04. low")]
    low: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    #[serde(rename = "Symbol")]
    symbol: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    market_capitalization: Option<String>,
    #[serde(rename = "PERatio")]
    pe_ratio: Option<String>,
    #[serde(rename = "QuarterlyRevenueGrowthYOY")]
    quarterly_revenue_growth_yoy: Option<String>,
    #[serde(rename = "QuarterlyEarningsGrowthYOY")]
    quarterly_earnings_growth_yoy: Option<String>,
    #[serde(rename = "OperatingMarginTTM")]
    operating_margin_ttm: Option<String>,
    #[serde(rename = "ProfitMargin")]
    profit_margin: Option<String>,
    #[serde(rename = "ReturnOnEquityTTM")]
    return_on_equity_ttm: Option<String>,
    #[serde(rename = "ReturnOnAssetsTTM")]
    return_on_assets_ttm: Option<String>,
    #[serde(rename = "DebtToEquityRatio")]
    debt_to_equity_ratio: Option<String>,
    #[serde(rename = "CurrentRatio")]
    current_ratio: Option<String>,
    #[serde(rename = "Beta")]
    beta: Option<String>,
    #[serde(rename = "52WeekHigh")]
    week52_high: Option<String>,
    #[serde(rename = "52WeekLow")]
    week52_low: Option<String>,
    #[serde(rename = "Sector")]
    sector: Option<String>,
    #[serde(rename = "Industry")]
    industry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FinnhubArticle {
    #[serde(default)]
    headline: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    datetime: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_percent_field_strips_suffix() {
        let quote = GlobalQuote {
            open: Some("100.0".to_string()),
            high: Some("105.0".to_string()),
            low: Some("99.0".to_string()),
            price: Some("104.0".to_string()),
            volume: Some("1234567".to_string()),
            previous_close: Some("101.0".to_string()),
            change: Some("3.0".to_string()),
            change_percent: Some("2.9703%".to_string()),
        };
        assert!((parse_percent(&quote.change_percent) - 2.9703).abs() < 1e-9);
        assert_eq!(parse_field(&quote.price), 104.0);
    }

    #[test]
    fn overview_missing_values_parse_to_none() {
        assert_eq!(parse_opt(&Some("None".to_string())), None);
        assert_eq!(parse_opt(&Some("-".to_string())), None);
        assert_eq!(parse_opt(&Some("1.52".to_string())), Some(1.52));
        assert_eq!(parse_opt(&None), None);
        assert_eq!(non_empty(Some("None".to_string())), None);
        assert_eq!(non_empty(Some(String::new())), None);
    }

    #[test]
    fn assembly_estimates_volatility_from_52_week_range() {
        let quote = QuoteBlock {
            price: 100.0,
            change: 1.0,
            change_percent: 1.0,
            volume: 1000,
            previous_close: 99.0,
            high: 101.0,
            low: 98.0,
            open: 99.5,
        };
        let fundamentals = FundamentalsBlock {
            week52_high: Some(130.0),
            week52_low: Some(90.0),
            ..Default::default()
        };
        let snapshot = assemble_snapshot(
            "aapl",
            quote,
            fundamentals,
            Vec::new(),
            sentiment::analyst_placeholder(),
        );

        assert_eq!(snapshot.symbol, "AAPL");
        assert_eq!(snapshot.volatility, Some(0.4));
        assert_eq!(snapshot.beta, Some(1.0));
        assert_eq!(snapshot.sector.as_deref(), Some("Technology"));
    }

    #[test]
    fn assembly_falls_back_when_range_missing() {
        let quote = mock::quote("MSFT");
        let snapshot = assemble_snapshot(
            "MSFT",
            quote,
            FundamentalsBlock::default(),
            Vec::new(),
            sentiment::analyst_placeholder(),
        );
        assert_eq!(snapshot.volatility, Some(0.3));
    }

    #[tokio::test]
    async fn fetch_without_keys_serves_mock_snapshot() {
        // No vendor keys configured: every sub-fetch fails fast and the
        // mock fallback fills in a complete snapshot.
        let client = MarketDataClient::new(MarketDataConfig::default());
        let snapshot = client.fetch_snapshot("nvda").await.unwrap();

        assert_eq!(snapshot.symbol, "NVDA");
        assert!(snapshot.price > 0.0);
        assert!(snapshot.market_cap.is_some());
        assert!(!snapshot.news.is_empty());
        assert!(snapshot.sentiment.is_some());
    }

    #[tokio::test]
    async fn strict_mode_surfaces_provider_failure() {
        let config = MarketDataConfig {
            fallback_to_mock: false,
            ..Default::default()
        };
        let client = MarketDataClient::new(config);
        let err = client.fetch_snapshot("NVDA").await.unwrap_err();
        assert!(matches!(err, VectorError::Provider(_)));
    }
}
