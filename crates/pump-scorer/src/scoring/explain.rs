use serde::Serialize;

use super::rules::{FactorLabel, FactorMap};

/// Coarse bucket of the clamped probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Strong,
    Moderate,
    HighRisk,
}

impl ScoreTier {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            Self::Strong
        } else if probability > 0.4 {
            Self::Moderate
        } else {
            Self::HighRisk
        }
    }

    /// Leading sentence of the explanation, including its trailing space.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Strong => "Strong pump potential detected! ",
            Self::Moderate => "Moderate potential with mixed signals. ",
            Self::HighRisk => "High risk detected, proceed with caution. ",
        }
    }
}

pub(crate) fn describe(tier: ScoreTier, factors: &FactorMap) -> String {
    let mut details = Vec::with_capacity(2);

    let positive = factors.positive_labels();
    if !positive.is_empty() {
        details.push(format!("Positive: {}", join_labels(&positive)));
    }

    let negative = factors.negative_labels();
    if !negative.is_empty() {
        details.push(format!("Concerns: {}", join_labels(&negative)));
    }

    format!("{}{}", tier.headline(), details.join(" "))
}

fn join_labels(labels: &[FactorLabel]) -> String {
    labels
        .iter()
        .map(|label| label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
