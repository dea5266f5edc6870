//! The six component scorers.
//!
//! Each scorer maps a snapshot to a score in [0, 100]: base 50, additive
//! adjustments gated by threshold bands on individual metrics (first
//! matching band wins per metric, different metrics stack), clamped at
//! the end. Missing metrics contribute nothing.

use crate::reported;
use vector_core::FinancialSnapshot;

const TECH_SECTORS: &[&str] = &[
    "Technology",
    "Software",
    "Semiconductors",
    "Internet",
    "AI",
    "Cloud Computing",
];

const GROWTH_SECTORS: &[&str] = &[
    "Technology",
    "Healthcare",
    "Renewable Energy",
    "E-commerce",
    "Cloud",
    "AI",
];

/// Names with heavy AI/quantum/blockchain exposure
const INNOVATION_SYMBOLS: &[&str] = &[
    "NVDA", "TSLA", "GOOGL", "MSFT", "AMZN", "META", "QUBT", "IONQ", "RGTI", "CRWV",
];

fn in_sector_set(sector: Option<&str>, set: &[&str]) -> bool {
    match sector {
        Some(s) => set.iter().any(|name| s.contains(name)),
        None => false,
    }
}

pub fn technology_innovation(data: &FinancialSnapshot) -> f64 {
    let mut score: f64 = 50.0;

    // R&D spending as % of revenue
    if let (Some(rd), Some(revenue)) = (reported(data.rd_spending), reported(data.revenue)) {
        let rd_ratio = rd / revenue;
        if rd_ratio > 0.15 {
            score += 25.0;
        } else if rd_ratio > 0.10 {
            score += 15.0;
        } else if rd_ratio > 0.05 {
            score += 10.0;
        }
    }

    // Patent portfolio
    if let Some(patents) = data.patent_count.filter(|&p| p > 0) {
        if patents > 1000 {
            score += 20.0;
        } else if patents > 100 {
            score += 15.0;
        } else if patents > 10 {
            score += 10.0;
        }
    }

    if in_sector_set(data.sector.as_deref(), TECH_SECTORS) {
        score += 10.0;
    }

    if INNOVATION_SYMBOLS.contains(&data.symbol.as_str()) {
        score += 15.0;
    }

    // Product launch frequency
    if data.product_launches.filter(|&n| n > 3).is_some() {
        score += 10.0;
    }

    score.clamp(0.0, 100.0)
}

pub fn growth_acceleration(data: &FinancialSnapshot) -> f64 {
    let mut score: f64 = 50.0;

    // Revenue growth rate, highest band wins
    if let Some(growth) = reported(data.revenue_growth) {
        if growth > 0.30 {
            score += 25.0;
        } else if growth > 0.20 {
            score += 20.0;
        } else if growth > 0.15 {
            score += 15.0;
        } else if growth > 0.10 {
            score += 10.0;
        } else if growth < 0.0 {
            score -= 15.0;
        }
    }

    // Earnings growth consistency
    if let Some(growth) = reported(data.earnings_growth) {
        if growth > 0.25 {
            score += 20.0;
        } else if growth > 0.15 {
            score += 15.0;
        } else if growth > 0.05 {
            score += 10.0;
        } else if growth < 0.0 {
            score -= 10.0;
        }
    }

    if reported(data.market_share_growth).is_some_and(|g| g > 0.02) {
        score += 15.0;
    }

    if reported(data.user_growth).is_some_and(|g| g > 0.20) {
        score += 10.0;
    }

    // Geographic expansion
    if reported(data.international_revenue).is_some_and(|r| r > 0.30) {
        score += 10.0;
    }

    score.clamp(0.0, 100.0)
}

pub fn strategic_direction(data: &FinancialSnapshot) -> f64 {
    let mut score: f64 = 50.0;

    // Market positioning by cap size
    if let Some(cap) = reported(data.market_cap) {
        let cap_billions = cap / 1e9;
        if cap_billions > 100.0 {
            score += 20.0;
        } else if cap_billions > 50.0 {
            score += 15.0;
        } else if cap_billions > 10.0 {
            score += 10.0;
        } else if cap_billions < 1.0 {
            score -= 10.0;
        }
    }

    if reported(data.management_rating).is_some_and(|r| r > 4.0) {
        score += 15.0;
    }

    if data.partnerships.filter(|&n| n > 5).is_some() {
        score += 10.0;
    }

    if let Some(esg) = reported(data.esg_score) {
        if esg > 80.0 {
            score += 15.0;
        } else if esg > 60.0 {
            score += 10.0;
        } else if esg < 30.0 {
            score -= 10.0;
        }
    }

    if in_sector_set(data.sector.as_deref(), GROWTH_SECTORS) {
        score += 15.0;
    }

    score.clamp(0.0, 100.0)
}

pub fn operational_excellence(data: &FinancialSnapshot) -> f64 {
    let mut score: f64 = 50.0;

    if let Some(margin) = reported(data.operating_margin) {
        if margin > 0.25 {
            score += 25.0;
        } else if margin > 0.15 {
            score += 20.0;
        } else if margin > 0.10 {
            score += 15.0;
        } else if margin > 0.05 {
            score += 10.0;
        } else if margin < 0.0 {
            score -= 15.0;
        }
    }

    // Asset utilization
    if let Some(roa) = reported(data.return_on_assets) {
        if roa > 0.15 {
            score += 20.0;
        } else if roa > 0.10 {
            score += 15.0;
        } else if roa > 0.05 {
            score += 10.0;
        }
    }

    if reported(data.inventory_turnover).is_some_and(|t| t > 8.0) {
        score += 10.0;
    }

    if reported(data.quality_rating).is_some_and(|r| r > 4.5) {
        score += 15.0;
    }

    score.clamp(0.0, 100.0)
}

pub fn financial_optimization(data: &FinancialSnapshot) -> f64 {
    let mut score: f64 = 50.0;

    if let Some(margin) = reported(data.net_margin) {
        if margin > 0.20 {
            score += 25.0;
        } else if margin > 0.15 {
            score += 20.0;
        } else if margin > 0.10 {
            score += 15.0;
        } else if margin > 0.05 {
            score += 10.0;
        } else if margin < 0.0 {
            score -= 20.0;
        }
    }

    if let Some(roe) = reported(data.roe) {
        if roe > 0.20 {
            score += 20.0;
        } else if roe > 0.15 {
            score += 15.0;
        } else if roe > 0.10 {
            score += 10.0;
        }
    }

    // Cash generation relative to revenue
    if let (Some(fcf), Some(revenue)) = (reported(data.free_cash_flow), reported(data.revenue)) {
        let fcf_margin = fcf / revenue;
        if fcf_margin > 0.15 {
            score += 15.0;
        } else if fcf_margin > 0.10 {
            score += 10.0;
        } else if fcf_margin > 0.05 {
            score += 5.0;
        }
    }

    // Balance sheet strength
    if let Some(d2e) = reported(data.debt_to_equity) {
        if d2e < 0.3 {
            score += 10.0;
        } else if d2e > 2.0 {
            score -= 15.0;
        }
    }

    score.clamp(0.0, 100.0)
}

pub fn risk_management(data: &FinancialSnapshot) -> f64 {
    let mut score: f64 = 50.0;

    if let Some(vol) = reported(data.volatility) {
        if vol < 0.20 {
            score += 25.0;
        } else if vol < 0.30 {
            score += 15.0;
        } else if vol < 0.40 {
            score += 5.0;
        } else if vol > 0.60 {
            score -= 20.0;
        }
    }

    if let Some(beta) = reported(data.beta) {
        if beta < 1.0 {
            score += 15.0;
        } else if beta > 1.5 {
            score -= 10.0;
        }
    }

    // Revenue stream diversification
    if data.business_segments.filter(|&n| n > 3).is_some() {
        score += 10.0;
    }

    if reported(data.compliance_score).is_some_and(|c| c > 85.0) {
        score += 15.0;
    }

    // Liquidity
    if let Some(ratio) = reported(data.current_ratio) {
        if ratio > 2.0 {
            score += 10.0;
        } else if ratio < 1.0 {
            score -= 15.0;
        }
    }

    score.clamp(0.0, 100.0)
}
