use serde::Serialize;
use std::collections::BTreeMap;

use super::domain::{RiskLevel, TokenRecord};

pub(crate) const PUMP_KEYWORDS: [&str; 17] = [
    "moon", "rocket", "pump", "gem", "100x", "1000x", "pepe", "doge", "shiba", "elon", "bonk",
    "lambo", "diamond", "hands", "hodl", "ape", "chad",
];

pub(crate) const SCAM_KEYWORDS: [&str; 9] = [
    "scam", "rug", "honeypot", "fake", "warning", "danger", "avoid", "stolen", "hack",
];

/// Numeric signals derived from a single record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenFeatures {
    pub text_length: usize,
    pub name_length: usize,
    pub pump_keyword_count: usize,
    pub scam_keyword_count: usize,
    pub has_twitter: f64,
    pub has_telegram: f64,
    pub has_website: f64,
    pub social_count: f64,
    pub liquidity: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    pub price: f64,
    pub liquidity_log: f64,
    pub volume_log: f64,
    pub risk_score: f64,
}

impl TokenFeatures {
    pub fn extract(record: &TokenRecord) -> Self {
        let text = format!("{} {}", record.name, record.description()).to_lowercase();

        let socials = record.socials.as_ref();
        let has_twitter = presence(socials.and_then(|s| s.twitter.as_deref()));
        let has_telegram = presence(socials.and_then(|s| s.telegram.as_deref()));
        let has_website = presence(socials.and_then(|s| s.website.as_deref()));

        let market = record.market.unwrap_or_default();

        let risk_score = record
            .risk_check
            .as_ref()
            .map(|check| check.level())
            .unwrap_or(RiskLevel::Unknown)
            .score();

        Self {
            text_length: text.chars().count(),
            name_length: record.name.chars().count(),
            pump_keyword_count: count_keywords(&text, &PUMP_KEYWORDS),
            scam_keyword_count: count_keywords(&text, &SCAM_KEYWORDS),
            has_twitter,
            has_telegram,
            has_website,
            social_count: has_twitter + has_telegram + has_website,
            liquidity: market.liquidity,
            volume_24h: market.volume_24h,
            price: market.price,
            liquidity_log: market.liquidity.ln_1p(),
            volume_log: market.volume_24h.ln_1p(),
            risk_score,
        }
    }

    /// Flat name-to-value view, keyed the way downstream model tooling expects.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("text_length", self.text_length as f64),
            ("name_length", self.name_length as f64),
            ("pump_keyword_count", self.pump_keyword_count as f64),
            ("scam_keyword_count", self.scam_keyword_count as f64),
            ("has_twitter", self.has_twitter),
            ("has_telegram", self.has_telegram),
            ("has_website", self.has_website),
            ("social_count", self.social_count),
            ("liquidity", self.liquidity),
            ("volume24h", self.volume_24h),
            ("price", self.price),
            ("liquidity_log", self.liquidity_log),
            ("volume_log", self.volume_log),
            ("risk_score", self.risk_score),
        ])
    }
}

fn presence(value: Option<&str>) -> f64 {
    match value {
        Some(value) if !value.is_empty() => 1.0,
        _ => 0.0,
    }
}

/// Each keyword counts once regardless of how often it appears.
fn count_keywords(text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count()
}
