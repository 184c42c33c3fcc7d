use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::ScoringError;

/// Token metadata submitted for scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub socials: Option<TokenSocials>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub market: Option<TokenMarket>,
    #[serde(default, rename = "rug", alias = "riskCheck")]
    pub risk_check: Option<RiskCheck>,
}

impl TokenRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Rejects market figures the wire contract forbids.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let Some(market) = &self.market else {
            return Ok(());
        };

        for (field, value) in [
            ("market.price", market.price),
            ("market.liquidity", market.liquidity),
            ("market.volume24h", market.volume_24h),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ScoringError::InvalidRecord { field, value });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSocials {
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMarket {
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub liquidity: f64,
    #[serde(default, rename = "volume24h")]
    pub volume_24h: f64,
}

/// Result of an upstream rug check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCheck {
    #[serde(default = "unknown_label")]
    pub status: String,
    #[serde(default = "unknown_label")]
    pub risk: String,
    #[serde(default)]
    pub details: Option<BTreeMap<String, Value>>,
}

impl RiskCheck {
    pub fn with_risk(risk: impl Into<String>) -> Self {
        Self {
            risk: risk.into(),
            ..Self::default()
        }
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_label(&self.risk)
    }
}

impl Default for RiskCheck {
    fn default() -> Self {
        Self {
            status: unknown_label(),
            risk: unknown_label(),
            details: None,
        }
    }
}

fn unknown_label() -> String {
    "unknown".to_string()
}

/// Normalized rug-check verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    /// Case-insensitive; anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unknown,
        }
    }

    pub fn score(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 0.5,
            Self::High => 0.0,
            Self::Unknown => 0.3,
        }
    }
}
