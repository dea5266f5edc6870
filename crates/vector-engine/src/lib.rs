pub mod scorers;
pub mod signals;

pub use signals::{determine_risk_level, generate_trading_signals};

use vector_core::{round1, ComponentScores, ComponentWeights, FinancialSnapshot, VectorAnalysis};

/// Vendor feeds encode "not reported" as 0, so gated metrics treat a zero
/// value the same as an absent one: no adjustment.
pub(crate) fn reported(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Six-component vector intelligence scoring engine.
///
/// Each component scorer is pure and independent; the engine combines them
/// with the fixed weightings and attaches qualitative insights.
pub struct VectorScoreEngine {
    weights: ComponentWeights,
}

impl VectorScoreEngine {
    pub fn new() -> Self {
        Self {
            weights: ComponentWeights::default(),
        }
    }

    pub fn score(&self, data: &FinancialSnapshot) -> VectorAnalysis {
        let raw = ComponentScores {
            technology_innovation: scorers::technology_innovation(data),
            growth_acceleration: scorers::growth_acceleration(data),
            strategic_direction: scorers::strategic_direction(data),
            operational_excellence: scorers::operational_excellence(data),
            financial_optimization: scorers::financial_optimization(data),
            risk_management: scorers::risk_management(data),
        };

        // The weighted sum uses raw components and is rounded exactly once;
        // rounding the components first would drift the total.
        let total = self.weights.weighted_sum(&raw);

        VectorAnalysis {
            total_score: round1(total),
            components: raw.rounded(),
            weights: self.weights,
            analysis: generate_insights(&raw, total),
        }
    }
}

impl Default for VectorScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered qualitative insights. The total handed in is the unrounded
/// weighted sum; classification of the rounded score happens elsewhere.
fn generate_insights(components: &ComponentScores, total_score: f64) -> Vec<String> {
    let mut insights = Vec::new();

    if components.technology_innovation > 80.0 {
        insights.push("Strong technology innovation and R&D investment".to_string());
    }

    if components.growth_acceleration > 75.0 {
        insights.push("Excellent growth trajectory with strong fundamentals".to_string());
    }

    if components.risk_management < 40.0 {
        insights.push("Higher risk profile requires careful position sizing".to_string());
    }

    if total_score > 85.0 {
        insights.push("UNICORN PICK - Exceptional investment opportunity".to_string());
    } else if total_score > 75.0 {
        insights.push("STRONG MOMENTUM - Solid investment with good upside potential".to_string());
    }

    insights
}
