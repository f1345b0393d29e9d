//! Deal scoring and next-action recommendations.
//!
//! Everything here is a pure function of a single `Deal`. The score is a
//! fixed-point risk accumulation: stale pipelines and stale contact add risk,
//! negotiation removes some, and the close probability is `100 - risk` with
//! a floor of 5. There is no upper clamp, so a clean negotiation-stage deal
//! scores 110.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{Deal, STAGE_DISCOVERY, STAGE_NEGOTIATION, STAGE_PROPOSAL};

/// Deals older than this many days carry pipeline risk.
pub const STALE_PIPELINE_DAYS: u32 = 30;

/// Deals without contact for longer than this many days carry contact risk.
pub const STALE_CONTACT_DAYS: u32 = 7;

const PIPELINE_RISK: i32 = 15;
const CONTACT_RISK: i32 = 20;
const NEGOTIATION_RELIEF: i32 = 10;
const MIN_PROBABILITY: i32 = 5;

/// Deals above this value are high priority (and count as high value).
pub const HIGH_VALUE_THRESHOLD: u64 = 75_000;

/// Deals above this value (and not high) are medium priority.
pub const MEDIUM_VALUE_THRESHOLD: u64 = 30_000;

pub const ACTION_RE_ENGAGE: &str = "Re-engage client with follow-up call or email";
pub const ACTION_DECISION_MAKER: &str = "Schedule decision-maker meeting to accelerate closure";
pub const ACTION_DISCOVERY: &str = "Clarify business requirements and confirm budget";
pub const ACTION_PROPOSAL: &str = "Follow up on proposal feedback and objections";
pub const ACTION_NEGOTIATION: &str = "Offer incentive or revised pricing to close deal";
pub const ACTION_DEFAULT: &str = "Maintain regular communication cadence";

/// Returns true when the last contact is older than the contact threshold.
pub fn needs_attention(deal: &Deal) -> bool {
    deal.last_contact_days > STALE_CONTACT_DAYS
}

/// Returns true when the deal has been open longer than the pipeline threshold.
pub fn is_stale(deal: &Deal) -> bool {
    deal.days_in_pipeline > STALE_PIPELINE_DAYS
}

/// Compute the close probability of a deal.
pub fn calculate_score(deal: &Deal) -> u32 {
    let mut risk = 0;

    if is_stale(deal) {
        risk += PIPELINE_RISK;
    }
    if needs_attention(deal) {
        risk += CONTACT_RISK;
    }
    if deal.stage == STAGE_NEGOTIATION {
        risk -= NEGOTIATION_RELIEF;
    }

    let probability = (100 - risk).max(MIN_PROBABILITY);
    debug!(deal_id = %deal.deal_id, risk, probability, "Scored deal");

    // Always >= MIN_PROBABILITY, so the conversion cannot fail.
    probability.unsigned_abs()
}

/// Coarse risk classification, inversely related to close probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: u32) -> Self {
        if probability > 75 {
            Self::Low
        } else if probability > 50 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Follow-up priority, derived from deal value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_value(value: u64) -> Self {
        if value > HIGH_VALUE_THRESHOLD {
            Self::High
        } else if value > MEDIUM_VALUE_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Score of a single deal, as returned by `score_deal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DealScore {
    pub deal_id: String,
    pub company: String,
    pub close_probability: u32,
    pub risk_level: RiskLevel,
}

/// Compute the score and risk level of a deal.
pub fn score_deal(deal: &Deal) -> DealScore {
    let close_probability = calculate_score(deal);
    DealScore {
        deal_id: deal.deal_id.clone(),
        company: deal.company.clone(),
        close_probability,
        risk_level: RiskLevel::from_probability(close_probability),
    }
}

/// Recommended follow-up for a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    pub deal_id: String,
    pub company: String,
    pub priority: Priority,
    pub recommended_actions: Vec<String>,
}

/// Build the prioritized action list for a deal.
///
/// Every matching rule contributes an action, in rule order. A deal that
/// triggers nothing gets the default cadence action.
pub fn recommend(deal: &Deal) -> Recommendation {
    let mut actions = Vec::new();

    if needs_attention(deal) {
        actions.push(ACTION_RE_ENGAGE);
    }
    if is_stale(deal) {
        actions.push(ACTION_DECISION_MAKER);
    }
    match deal.stage.as_str() {
        STAGE_DISCOVERY => actions.push(ACTION_DISCOVERY),
        STAGE_PROPOSAL => actions.push(ACTION_PROPOSAL),
        STAGE_NEGOTIATION => actions.push(ACTION_NEGOTIATION),
        _ => {}
    }
    if actions.is_empty() {
        actions.push(ACTION_DEFAULT);
    }

    Recommendation {
        deal_id: deal.deal_id.clone(),
        company: deal.company.clone(),
        priority: Priority::from_value(deal.value),
        recommended_actions: actions.into_iter().map(String::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn deal(stage: &str, days_in_pipeline: u32, last_contact_days: u32) -> Deal {
        Deal::new("D-1", "Acme", 10_000, stage).with_age(days_in_pipeline, last_contact_days)
    }

    #[test]
    fn test_fresh_deal_scores_100() {
        assert_eq!(calculate_score(&deal(STAGE_DISCOVERY, 0, 0)), 100);
        assert_eq!(calculate_score(&deal(STAGE_PROPOSAL, 30, 7)), 100);
    }

    #[test]
    fn test_stale_negotiation_scores_75() {
        assert_eq!(calculate_score(&deal(STAGE_NEGOTIATION, 31, 8)), 75);
    }

    #[test]
    fn test_clean_negotiation_exceeds_100() {
        assert_eq!(calculate_score(&deal(STAGE_NEGOTIATION, 0, 0)), 110);
    }

    #[test]
    fn test_individual_risks() {
        assert_eq!(calculate_score(&deal(STAGE_PROPOSAL, 31, 0)), 85);
        assert_eq!(calculate_score(&deal(STAGE_PROPOSAL, 0, 8)), 80);
        assert_eq!(calculate_score(&deal(STAGE_PROPOSAL, 31, 8)), 65);
    }

    #[test]
    fn test_stage_match_is_exact() {
        assert_eq!(calculate_score(&deal("negotiation", 0, 0)), 100);
        assert_eq!(calculate_score(&deal("Negotiation ", 0, 0)), 100);
    }

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_probability(110), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(76), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(75), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(51), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(50), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(5), RiskLevel::High);
    }

    #[test]
    fn test_priority_boundaries() {
        assert_eq!(Priority::from_value(80_000), Priority::High);
        assert_eq!(Priority::from_value(75_001), Priority::High);
        assert_eq!(Priority::from_value(75_000), Priority::Medium);
        assert_eq!(Priority::from_value(30_001), Priority::Medium);
        assert_eq!(Priority::from_value(30_000), Priority::Low);
        assert_eq!(Priority::from_value(0), Priority::Low);
    }

    #[test]
    fn test_score_deal_includes_risk_level() {
        let score = score_deal(&deal(STAGE_NEGOTIATION, 31, 8));
        assert_eq!(score.close_probability, 75);
        assert_eq!(score.risk_level, RiskLevel::Medium);
        assert_eq!(score.deal_id, "D-1");
    }

    #[test]
    fn test_recommend_discovery_only() {
        let rec = recommend(&deal(STAGE_DISCOVERY, 0, 0));
        assert_eq!(rec.recommended_actions, vec![ACTION_DISCOVERY]);
        assert_eq!(rec.priority, Priority::Low);
    }

    #[test]
    fn test_recommend_default_action() {
        let rec = recommend(&deal("Closed Won", 3, 2));
        assert_eq!(rec.recommended_actions, vec![ACTION_DEFAULT]);
    }

    #[test]
    fn test_recommend_all_rules_in_order() {
        let rec = recommend(&deal(STAGE_PROPOSAL, 45, 12));
        assert_eq!(
            rec.recommended_actions,
            vec![ACTION_RE_ENGAGE, ACTION_DECISION_MAKER, ACTION_PROPOSAL]
        );
    }

    #[test]
    fn test_recommend_negotiation() {
        let mut d = deal(STAGE_NEGOTIATION, 0, 8);
        d.value = 120_000;
        let rec = recommend(&d);
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(
            rec.recommended_actions,
            vec![ACTION_RE_ENGAGE, ACTION_NEGOTIATION]
        );
    }

    #[test]
    fn test_serialized_labels() {
        assert_eq!(serde_json::to_value(RiskLevel::Low).unwrap(), "Low");
        assert_eq!(serde_json::to_value(Priority::High).unwrap(), "High");
    }

    fn stage_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(STAGE_DISCOVERY.to_string()),
            Just(STAGE_PROPOSAL.to_string()),
            Just(STAGE_NEGOTIATION.to_string()),
            "[A-Za-z ]{0,12}",
        ]
    }

    proptest! {
        #[test]
        fn prop_probability_has_floor(
            stage in stage_strategy(),
            days in any::<u32>(),
            contact in any::<u32>(),
        ) {
            let p = calculate_score(&deal(&stage, days, contact));
            prop_assert!(p >= 5);
            prop_assert!(p <= 110);
        }

        #[test]
        fn prop_untroubled_deal_scores_100(
            stage in stage_strategy().prop_filter("not negotiation", |s| s != STAGE_NEGOTIATION),
            days in 0u32..=30,
            contact in 0u32..=7,
        ) {
            prop_assert_eq!(calculate_score(&deal(&stage, days, contact)), 100);
        }

        #[test]
        fn prop_recommendation_never_empty(
            stage in stage_strategy(),
            days in any::<u32>(),
            contact in any::<u32>(),
        ) {
            let rec = recommend(&deal(&stage, days, contact));
            prop_assert!(!rec.recommended_actions.is_empty());
        }
    }
}
