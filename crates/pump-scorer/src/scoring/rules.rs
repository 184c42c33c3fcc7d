use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

use super::features::TokenFeatures;

pub(crate) const BASE_SCORE: f64 = 0.5;
pub(crate) const MIN_PROBABILITY: f64 = 0.01;
pub(crate) const MAX_PROBABILITY: f64 = 0.99;

const HIGH_LIQUIDITY: f64 = 100_000.0;
const LOW_LIQUIDITY: f64 = 10_000.0;
const GOOD_VOLUME: f64 = 50_000.0;
const LOW_RISK_ABOVE: f64 = 0.7;
const HIGH_RISK_BELOW: f64 = 0.3;

/// Hand-tuned contribution of each rule.
#[derive(Debug)]
pub(crate) struct RuleWeights {
    pub twitter: f64,
    pub telegram: f64,
    pub website: f64,
    pub high_liquidity: f64,
    pub low_liquidity: f64,
    pub good_volume: f64,
    pub low_risk: f64,
    pub high_risk: f64,
    pub pump_keyword: f64,
    pub pump_keyword_cap: f64,
    pub scam_keyword: f64,
}

pub(crate) static WEIGHTS: RuleWeights = RuleWeights {
    twitter: 0.15,
    telegram: 0.10,
    website: 0.10,
    high_liquidity: 0.20,
    low_liquidity: -0.10,
    good_volume: 0.15,
    low_risk: 0.20,
    high_risk: -0.20,
    pump_keyword: 0.05,
    pump_keyword_cap: 0.15,
    scam_keyword: -0.15,
};

/// A rule inspects the features and yields at most one factor.
pub(crate) type Rule = fn(&TokenFeatures, &RuleWeights) -> Option<Factor>;

/// Canonical evaluation order; explanations list factors in this order.
pub(crate) static RULES: [Rule; 8] = [
    twitter_rule,
    telegram_rule,
    website_rule,
    liquidity_rule,
    volume_rule,
    risk_rule,
    pump_keyword_rule,
    scam_keyword_rule,
];

/// Label attached to a fired rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorLabel {
    Twitter,
    Telegram,
    Website,
    HighLiquidity,
    LowLiquidity,
    GoodVolume,
    LowRisk,
    HighRisk,
    PumpKeywords,
    ScamKeywords,
}

impl FactorLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Telegram => "telegram",
            Self::Website => "website",
            Self::HighLiquidity => "high_liquidity",
            Self::LowLiquidity => "low_liquidity",
            Self::GoodVolume => "good_volume",
            Self::LowRisk => "low_risk",
            Self::HighRisk => "high_risk",
            Self::PumpKeywords => "pump_keywords",
            Self::ScamKeywords => "scam_keywords",
        }
    }
}

impl fmt::Display for FactorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed contribution of one fired rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factor {
    pub label: FactorLabel,
    pub contribution: f64,
}

impl Factor {
    fn new(label: FactorLabel, contribution: f64) -> Self {
        Self {
            label,
            contribution,
        }
    }
}

/// Fired factors in rule order. Serializes as a JSON object keyed by label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorMap {
    factors: Vec<Factor>,
}

impl FactorMap {
    pub fn get(&self, label: FactorLabel) -> Option<f64> {
        self.factors
            .iter()
            .find(|factor| factor.label == label)
            .map(|factor| factor.contribution)
    }

    pub fn contains(&self, label: FactorLabel) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Factor> {
        self.factors.iter()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn labels(&self) -> Vec<FactorLabel> {
        self.factors.iter().map(|factor| factor.label).collect()
    }

    pub fn positive_labels(&self) -> Vec<FactorLabel> {
        self.labels_where(|contribution| contribution > 0.0)
    }

    pub fn negative_labels(&self) -> Vec<FactorLabel> {
        self.labels_where(|contribution| contribution < 0.0)
    }

    /// Sum of contributions before clamping.
    pub fn total(&self) -> f64 {
        self.factors.iter().map(|factor| factor.contribution).sum()
    }

    fn labels_where(&self, keep: impl Fn(f64) -> bool) -> Vec<FactorLabel> {
        self.factors
            .iter()
            .filter(|factor| keep(factor.contribution))
            .map(|factor| factor.label)
            .collect()
    }

    fn push(&mut self, factor: Factor) {
        if factor.contribution != 0.0 {
            self.factors.push(factor);
        }
    }
}

impl Serialize for FactorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.factors.len()))?;
        for factor in &self.factors {
            map.serialize_entry(factor.label.as_str(), &factor.contribution)?;
        }
        map.end()
    }
}

/// Applies every rule to the base score. Returns the unclamped score and fired factors.
pub(crate) fn apply(features: &TokenFeatures, weights: &RuleWeights) -> (f64, FactorMap) {
    let mut factors = FactorMap::default();
    let mut raw_score = BASE_SCORE;

    for rule in RULES.iter() {
        if let Some(factor) = rule(features, weights) {
            raw_score += factor.contribution;
            factors.push(factor);
        }
    }

    (raw_score, factors)
}

pub(crate) fn clamp_probability(raw_score: f64) -> f64 {
    raw_score.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

fn twitter_rule(features: &TokenFeatures, weights: &RuleWeights) -> Option<Factor> {
    (features.has_twitter > 0.0).then(|| Factor::new(FactorLabel::Twitter, weights.twitter))
}

fn telegram_rule(features: &TokenFeatures, weights: &RuleWeights) -> Option<Factor> {
    (features.has_telegram > 0.0).then(|| Factor::new(FactorLabel::Telegram, weights.telegram))
}

fn website_rule(features: &TokenFeatures, weights: &RuleWeights) -> Option<Factor> {
    (features.has_website > 0.0).then(|| Factor::new(FactorLabel::Website, weights.website))
}

fn liquidity_rule(features: &TokenFeatures, weights: &RuleWeights) -> Option<Factor> {
    if features.liquidity > HIGH_LIQUIDITY {
        Some(Factor::new(
            FactorLabel::HighLiquidity,
            weights.high_liquidity,
        ))
    } else if features.liquidity < LOW_LIQUIDITY {
        Some(Factor::new(
            FactorLabel::LowLiquidity,
            weights.low_liquidity,
        ))
    } else {
        None
    }
}

fn volume_rule(features: &TokenFeatures, weights: &RuleWeights) -> Option<Factor> {
    (features.volume_24h > GOOD_VOLUME)
        .then(|| Factor::new(FactorLabel::GoodVolume, weights.good_volume))
}

// "unknown" sits exactly on the lower bound and fires neither branch.
fn risk_rule(features: &TokenFeatures, weights: &RuleWeights) -> Option<Factor> {
    if features.risk_score > LOW_RISK_ABOVE {
        Some(Factor::new(FactorLabel::LowRisk, weights.low_risk))
    } else if features.risk_score < HIGH_RISK_BELOW {
        Some(Factor::new(FactorLabel::HighRisk, weights.high_risk))
    } else {
        None
    }
}

fn pump_keyword_rule(features: &TokenFeatures, weights: &RuleWeights) -> Option<Factor> {
    (features.pump_keyword_count > 0).then(|| {
        let bonus = (features.pump_keyword_count as f64 * weights.pump_keyword)
            .min(weights.pump_keyword_cap);
        Factor::new(FactorLabel::PumpKeywords, bonus)
    })
}

// Uncapped, unlike the pump bonus.
fn scam_keyword_rule(features: &TokenFeatures, weights: &RuleWeights) -> Option<Factor> {
    (features.scam_keyword_count > 0).then(|| {
        Factor::new(
            FactorLabel::ScamKeywords,
            features.scam_keyword_count as f64 * weights.scam_keyword,
        )
    })
}
