//! Feature extraction and rule-based pump scoring.
//!
//! [`TokenScorer`] is an immutable value: its weight, keyword, and rule tables are `static`
//! data, so one instance can be shared across request handlers without synchronization.

pub mod domain;
mod explain;
pub mod features;
pub mod handle;
pub mod router;
mod rules;

#[cfg(test)]
mod tests;

pub use domain::{RiskCheck, RiskLevel, TokenMarket, TokenRecord, TokenSocials};
pub use explain::ScoreTier;
pub use features::TokenFeatures;
pub use handle::ScorerHandle;
pub use router::{score_router, ScoreResponse};
pub use rules::{Factor, FactorLabel, FactorMap};

use rules::{RuleWeights, WEIGHTS};
use serde::Serialize;
use tracing::debug;

/// Stateless scorer applying the fixed rule table to a token record.
#[derive(Debug, Clone, Copy)]
pub struct TokenScorer {
    weights: &'static RuleWeights,
}

impl TokenScorer {
    pub fn new() -> Self {
        Self { weights: &WEIGHTS }
    }

    pub fn extract_features(&self, record: &TokenRecord) -> TokenFeatures {
        TokenFeatures::extract(record)
    }

    /// Total over any record; absent fields fall back to neutral defaults.
    pub fn score(&self, record: &TokenRecord) -> ScoreResult {
        let features = self.extract_features(record);
        let (raw_score, factors) = rules::apply(&features, self.weights);
        let probability = rules::clamp_probability(raw_score);
        let tier = ScoreTier::from_probability(probability);
        let explanation = explain::describe(tier, &factors);

        debug!(
            token = %record.name,
            raw_score,
            probability,
            fired = factors.len(),
            "token scored"
        );

        ScoreResult {
            probability,
            raw_score,
            tier,
            explanation,
            factors,
        }
    }

    /// Like [`TokenScorer::score`], but surfaces a non-finite result as an error.
    pub fn try_score(&self, record: &TokenRecord) -> Result<ScoreResult, ScoringError> {
        let result = self.score(record);
        if result.probability.is_finite() {
            Ok(result)
        } else {
            Err(ScoringError::NonFinite {
                value: result.raw_score,
            })
        }
    }
}

impl Default for TokenScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of a single scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Clamped to `[0.01, 0.99]`.
    pub probability: f64,
    /// Base score plus every contribution, before clamping.
    pub raw_score: f64,
    pub tier: ScoreTier,
    pub explanation: String,
    pub factors: FactorMap,
}

/// Error raised around a scoring call.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scorer not initialized")]
    NotReady,
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidRecord { field: &'static str, value: f64 },
    #[error("scoring failed: score evaluated to {value}")]
    NonFinite { value: f64 },
}
