use super::common::*;
use crate::scoring::domain::TokenRecord;
use crate::scoring::ScoreTier;

#[test]
fn tiers_split_on_clamped_probability() {
    assert_eq!(ScoreTier::from_probability(0.99), ScoreTier::Strong);
    assert_eq!(ScoreTier::from_probability(0.71), ScoreTier::Strong);
    assert_eq!(ScoreTier::from_probability(0.7), ScoreTier::Moderate);
    assert_eq!(ScoreTier::from_probability(0.41), ScoreTier::Moderate);
    assert_eq!(ScoreTier::from_probability(0.4), ScoreTier::HighRisk);
    assert_eq!(ScoreTier::from_probability(0.01), ScoreTier::HighRisk);
}

#[test]
fn strong_token_lists_positives_in_rule_order() {
    let result = scorer().score(&established_token());

    assert_eq!(result.tier, ScoreTier::Strong);
    assert_eq!(
        result.explanation,
        "Strong pump potential detected! Positive: twitter, telegram, website, high_liquidity, good_volume, low_risk"
    );
}

#[test]
fn mixed_signals_list_positive_then_concerns() {
    let result = scorer().score(&TokenRecord::named("SafeMoon Classic"));

    assert_eq!(
        result.explanation,
        "Moderate potential with mixed signals. Positive: pump_keywords Concerns: low_liquidity"
    );
}

#[test]
fn high_risk_token_lists_only_concerns() {
    let result = scorer().score(&scam_token());

    assert_eq!(result.tier, ScoreTier::HighRisk);
    assert!(result
        .explanation
        .starts_with("High risk detected, proceed with caution."));
    assert_eq!(
        result.explanation,
        "High risk detected, proceed with caution. Concerns: low_liquidity, high_risk, scam_keywords"
    );
}

#[test]
fn no_fired_rules_keeps_headline_with_trailing_space() {
    let mut record = TokenRecord::named("Token");
    record.market = Some(neutral_market());

    let result = scorer().score(&record);

    assert!(result.factors.is_empty());
    assert_eq!(
        result.explanation,
        "Moderate potential with mixed signals. "
    );
    assert_eq!(result.explanation, ScoreTier::Moderate.headline());
}
