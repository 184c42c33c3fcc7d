use axum::response::Response;
use serde_json::Value;

use crate::scoring::domain::{RiskCheck, TokenMarket, TokenRecord, TokenSocials};
use crate::scoring::TokenScorer;

pub(super) fn scorer() -> TokenScorer {
    TokenScorer::new()
}

pub(super) fn all_socials() -> TokenSocials {
    TokenSocials {
        twitter: Some("https://x.com/token".to_string()),
        telegram: Some("https://t.me/token".to_string()),
        website: Some("https://token.example".to_string()),
    }
}

pub(super) fn market(liquidity: f64, volume_24h: f64, price: f64) -> TokenMarket {
    TokenMarket {
        price,
        liquidity,
        volume_24h,
    }
}

/// Neutral market: liquidity inside the dead band, volume below the bonus line.
pub(super) fn neutral_market() -> TokenMarket {
    market(50_000.0, 1_000.0, 0.5)
}

pub(super) fn with_risk(mut record: TokenRecord, risk: &str) -> TokenRecord {
    record.risk_check = Some(RiskCheck::with_risk(risk));
    record
}

/// Every positive rule fires.
pub(super) fn established_token() -> TokenRecord {
    TokenRecord {
        name: "Token".to_string(),
        socials: Some(all_socials()),
        market: Some(market(200_000.0, 60_000.0, 1.0)),
        risk_check: Some(RiskCheck::with_risk("low")),
        ..TokenRecord::default()
    }
}

pub(super) fn scam_token() -> TokenRecord {
    with_risk(TokenRecord::named("rug scam honeypot"), "high")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
