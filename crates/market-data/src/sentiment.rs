//! Word-list sentiment heuristics.
//!
//! Placeholder-grade by design: headline sentiment is a lexicon count on a
//! 0–1 scale and the analyst block is a fixed consensus with randomized
//! social/news readings. Real NLP scoring is out of scope.

use rand::Rng;
use vector_core::AnalystSentiment;

const POSITIVE_WORDS: &[&str] = &[
    "growth", "profit", "beat", "strong", "positive", "upgrade", "buy", "bullish",
];

const NEGATIVE_WORDS: &[&str] = &[
    "loss", "decline", "weak", "negative", "downgrade", "sell", "bearish",
];

/// Score a headline/summary blob: 0.5 neutral baseline, ±0.1 per matched
/// word, clamped to [0, 1]. Matching is substring within each word, so
/// "upgraded" counts for "upgrade".
pub fn text_sentiment(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let mut score: f64 = 0.5;

    for word in lowered.split_whitespace() {
        if POSITIVE_WORDS.iter().any(|pos| word.contains(pos)) {
            score += 0.1;
        }
        if NEGATIVE_WORDS.iter().any(|neg| word.contains(neg)) {
            score -= 0.1;
        }
    }

    score.clamp(0.0, 1.0)
}

/// Fixed analyst consensus placeholder with randomized social/news
/// sentiment in [0.2, 0.8]
pub fn analyst_placeholder() -> AnalystSentiment {
    let mut rng = rand::thread_rng();

    AnalystSentiment {
        analyst_rating: 4.2,
        analyst_count: 15,
        strong_buy: 8,
        buy: 4,
        hold: 2,
        sell: 1,
        strong_sell: 0,
        price_target: None,
        social_sentiment: rng.gen_range(0.2..0.8),
        news_sentiment: rng.gen_range(0.2..0.8),
    }
}
