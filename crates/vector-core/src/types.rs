use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News article with a pre-computed headline sentiment score (0.0–1.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub headline: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub datetime: DateTime<Utc>,
    pub sentiment: f64,
}

/// Analyst coverage summary (placeholder-grade, see market-data)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystSentiment {
    pub analyst_rating: f64,
    pub analyst_count: u32,
    pub strong_buy: u32,
    pub buy: u32,
    pub hold: u32,
    pub sell: u32,
    pub strong_sell: u32,
    pub price_target: Option<f64>,
    pub social_sentiment: f64,
    pub news_sentiment: f64,
}

/// Point-in-time market data for one symbol, merged from all vendor feeds.
///
/// Price fields default to 0 when a feed omits them; fundamentals and the
/// extended metrics are `None` when unreported. Scorers must treat absence
/// as "no adjustment".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    pub symbol: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub previous_close: f64,
    #[serde(default)]
    pub volume: u64,
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
    pub volatility: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    // Extended metrics, used opportunistically by the scorers
    pub rd_spending: Option<f64>,
    pub revenue: Option<f64>,
    pub patent_count: Option<u64>,
    pub product_launches: Option<u32>,
    pub market_share_growth: Option<f64>,
    pub user_growth: Option<f64>,
    pub international_revenue: Option<f64>,
    pub management_rating: Option<f64>,
    pub partnerships: Option<u32>,
    pub esg_score: Option<f64>,
    pub inventory_turnover: Option<f64>,
    pub quality_rating: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub business_segments: Option<u32>,
    pub compliance_score: Option<f64>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    pub sentiment: Option<AnalystSentiment>,
    pub last_updated: DateTime<Utc>,
}

impl FinancialSnapshot {
    /// Empty snapshot for a symbol: zeroed price block, no fundamentals.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            price: 0.0,
            change: 0.0,
            change_percent: 0.0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            previous_close: 0.0,
            volume: 0,
            market_cap: None,
            pe_ratio: None,
            revenue_growth: None,
            earnings_growth: None,
            operating_margin: None,
            net_margin: None,
            roe: None,
            return_on_assets: None,
            debt_to_equity: None,
            current_ratio: None,
            beta: None,
            volatility: None,
            sector: None,
            industry: None,
            rd_spending: None,
            revenue: None,
            patent_count: None,
            product_launches: None,
            market_share_growth: None,
            user_growth: None,
            international_revenue: None,
            management_rating: None,
            partnerships: None,
            esg_score: None,
            inventory_turnover: None,
            quality_rating: None,
            free_cash_flow: None,
            business_segments: None,
            compliance_score: None,
            news: Vec::new(),
            sentiment: None,
            last_updated: Utc::now(),
        }
    }
}

/// The six sub-dimension ratings, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    pub technology_innovation: f64,
    pub growth_acceleration: f64,
    pub strategic_direction: f64,
    pub operational_excellence: f64,
    pub financial_optimization: f64,
    pub risk_management: f64,
}

impl ComponentScores {
    /// Each component rounded to one decimal for display
    pub fn rounded(&self) -> Self {
        Self {
            technology_innovation: round1(self.technology_innovation),
            growth_acceleration: round1(self.growth_acceleration),
            strategic_direction: round1(self.strategic_direction),
            operational_excellence: round1(self.operational_excellence),
            financial_optimization: round1(self.financial_optimization),
            risk_management: round1(self.risk_management),
        }
    }
}

/// Fixed component weightings (sum = 1.00)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentWeights {
    pub technology_innovation: f64,
    pub growth_acceleration: f64,
    pub strategic_direction: f64,
    pub operational_excellence: f64,
    pub financial_optimization: f64,
    pub risk_management: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            technology_innovation: 0.30,
            growth_acceleration: 0.25,
            strategic_direction: 0.20,
            operational_excellence: 0.10,
            financial_optimization: 0.10,
            risk_management: 0.05,
        }
    }
}

impl ComponentWeights {
    /// Weighted sum over the raw (unrounded) component scores
    pub fn weighted_sum(&self, c: &ComponentScores) -> f64 {
        c.technology_innovation * self.technology_innovation
            + c.growth_acceleration * self.growth_acceleration
            + c.strategic_direction * self.strategic_direction
            + c.operational_excellence * self.operational_excellence
            + c.financial_optimization * self.financial_optimization
            + c.risk_management * self.risk_management
    }
}

/// Composite vector intelligence rating for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorAnalysis {
    pub total_score: f64,
    pub components: ComponentScores,
    pub weights: ComponentWeights,
    pub analysis: Vec<String>,
}

/// Trade direction derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "HOLD")]
    Hold,
}

impl TradeAction {
    pub fn to_label(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::Hold => "HOLD",
        }
    }
}

/// Signal conviction tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalConfidence {
    High,
    Medium,
    Low,
}

/// Risk tier from volatility and total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

/// Qualitative score bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "UNICORN PICK")]
    UnicornPick,
    #[serde(rename = "STRONG MOMENTUM")]
    StrongMomentum,
    #[serde(rename = "MOMENTUM PLAY")]
    MomentumPlay,
    #[serde(rename = "WATCH LIST")]
    WatchList,
}

impl Classification {
    /// Bucket a total score. Total over [0, 100]: boundaries inclusive
    /// at 85 / 75 / 60.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => Classification::UnicornPick,
            s if s >= 75.0 => Classification::StrongMomentum,
            s if s >= 60.0 => Classification::MomentumPlay,
            _ => Classification::WatchList,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            Classification::UnicornPick => "UNICORN PICK",
            Classification::StrongMomentum => "STRONG MOMENTUM",
            Classification::MomentumPlay => "MOMENTUM PLAY",
            Classification::WatchList => "WATCH LIST",
        }
    }
}

/// Entry/stop/target levels with position sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSignal {
    pub signal: TradeAction,
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    /// Always the literal "2:1" — not derived from the actual stop/target
    /// spread (kept for wire compatibility with the original deployment)
    pub risk_reward: String,
    pub position_size: u32,
    pub confidence: SignalConfidence,
}

/// Full per-symbol analysis record, as cached and as served
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: Option<f64>,
    pub vector_score: f64,
    pub classification: Classification,
    pub components: ComponentScores,
    pub signals: TradingSignal,
    pub risk_level: RiskLevel,
    pub sector: String,
    pub last_updated: DateTime<Utc>,
}

/// One failed symbol from a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedSymbol {
    pub symbol: String,
    pub error: String,
}

/// Outcome of a watchlist refresh pass
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub success: usize,
    pub errors: usize,
    pub updated: Vec<String>,
    pub failed: Vec<FailedSymbol>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    pub duration: std::time::Duration,
}

impl BatchResult {
    pub fn new() -> Self {
        Self {
            success: 0,
            errors: 0,
            updated: Vec::new(),
            failed: Vec::new(),
            timestamp: Utc::now(),
            duration: std::time::Duration::ZERO,
        }
    }
}

impl Default for BatchResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
