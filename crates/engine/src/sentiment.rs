//! Overview sentiment as a VADER compound score.
//!
//! Scoring is delegated to `vader_sentiment`, which carries the full VADER
//! lexicon (about 7,500 rated words, slang and emoticons) and its rules:
//! boosters, negation in the three preceding words, the contrastive "but",
//! capitalization and exclamation emphasis. The compound score is the
//! summed valence normalized as `s / sqrt(s^2 + 15)`, so it lies in [-1, 1].
//!
//! The lexicon is loaded once per process and only read afterwards, so
//! one analyzer can be shared across threads.

use once_cell::sync::Lazy;
use vader_sentiment::SentimentIntensityAnalyzer;

static VADER: Lazy<SentimentIntensityAnalyzer<'static>> =
    Lazy::new(SentimentIntensityAnalyzer::new);

const COMPOUND_KEY: &str = "compound";

/// Stateless compound-sentiment scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compound sentiment in [-1, 1]. Empty or neutral text scores 0.
    pub fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        VADER
            .polarity_scores(text)
            .get(COMPOUND_KEY)
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}
