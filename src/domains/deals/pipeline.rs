//! Pipeline-wide aggregation and ranking.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::model::Deal;
use super::scoring::{HIGH_VALUE_THRESHOLD, calculate_score, needs_attention};

/// Message reported when the pipeline holds no deals.
pub const EMPTY_PIPELINE_MESSAGE: &str = "No deals in pipeline.";

/// Deals scoring below this probability are counted as high risk.
const HIGH_RISK_PROBABILITY: u32 = 50;

/// Aggregated view of the whole pipeline.
///
/// An empty pipeline is reported as a message rather than a zero-filled
/// summary, so the two shapes serialize differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PipelineSummary {
    Totals {
        total_deals: usize,
        total_pipeline_value: u64,
        average_close_probability: f64,
        high_risk_deals: usize,
        high_value_deals: usize,
        deals_needing_attention: usize,
    },
    Empty {
        message: String,
    },
}

impl PipelineSummary {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Summarize a set of deals in a single pass.
pub fn summarize_pipeline(deals: &[Deal]) -> PipelineSummary {
    if deals.is_empty() {
        return PipelineSummary::Empty {
            message: EMPTY_PIPELINE_MESSAGE.to_string(),
        };
    }

    let mut total_value: u64 = 0;
    let mut probability_sum: u64 = 0;
    let mut high_risk = 0;
    let mut high_value = 0;
    let mut attention = 0;

    for deal in deals {
        total_value = total_value.saturating_add(deal.value);

        let probability = calculate_score(deal);
        probability_sum += u64::from(probability);

        if probability < HIGH_RISK_PROBABILITY {
            high_risk += 1;
        }
        if deal.value > HIGH_VALUE_THRESHOLD {
            high_value += 1;
        }
        if needs_attention(deal) {
            attention += 1;
        }
    }

    let average = probability_sum as f64 / deals.len() as f64;

    PipelineSummary::Totals {
        total_deals: deals.len(),
        total_pipeline_value: total_value,
        average_close_probability: round2(average),
        high_risk_deals: high_risk,
        high_value_deals: high_value,
        deals_needing_attention: attention,
    }
}

/// Two decimal places, exact ties going to the even digit.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// A deal's position in the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedDeal {
    pub deal_id: String,
    pub company: String,
    pub value: u64,
    pub close_probability: u32,
}

/// Rank deals by close probability, highest first.
///
/// The sort is stable: deals with equal probability keep the order in
/// which they were given.
pub fn prioritize_deals(deals: &[Deal]) -> Vec<RankedDeal> {
    let mut ranked: Vec<RankedDeal> = deals
        .iter()
        .map(|deal| RankedDeal {
            deal_id: deal.deal_id.clone(),
            company: deal.company.clone(),
            value: deal.value,
            close_probability: calculate_score(deal),
        })
        .collect();

    ranked.sort_by(|a, b| b.close_probability.cmp(&a.close_probability));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::deals::model::{STAGE_DISCOVERY, STAGE_NEGOTIATION, STAGE_PROPOSAL};
    use proptest::prelude::*;

    fn sample_deals() -> Vec<Deal> {
        vec![
            // 100 - 15 - 20 = 65
            Deal::new("D-1", "Acme", 80_000, STAGE_PROPOSAL).with_age(45, 10),
            // 100 - 10 = 110
            Deal::new("D-2", "Globex", 20_000, STAGE_NEGOTIATION),
            // 100 - 15 - 20 = 65
            Deal::new("D-3", "Initech", 40_000, STAGE_DISCOVERY).with_age(31, 8),
            // 100
            Deal::new("D-4", "Umbrella", 76_000, STAGE_DISCOVERY).with_age(2, 1),
        ]
    }

    #[test]
    fn test_summary_average_rounds_ties_to_even() {
        let deals = vec![
            Deal::new("D-1", "A", 1_000, STAGE_NEGOTIATION),
            Deal::new("D-2", "B", 1_000, STAGE_DISCOVERY),
            Deal::new("D-3", "C", 1_000, STAGE_NEGOTIATION).with_age(31, 0),
            Deal::new("D-4", "D", 1_000, STAGE_NEGOTIATION).with_age(0, 8),
            Deal::new("D-5", "E", 1_000, STAGE_DISCOVERY).with_age(31, 0),
            Deal::new("D-6", "F", 1_000, STAGE_DISCOVERY).with_age(0, 8),
            Deal::new("D-7", "G", 1_000, STAGE_PROPOSAL).with_age(0, 8),
            Deal::new("D-8", "H", 1_000, STAGE_PROPOSAL).with_age(31, 8),
        ];
        let scores: Vec<u32> = deals.iter().map(calculate_score).collect();
        assert_eq!(scores, vec![110, 100, 95, 90, 85, 80, 80, 65]);

        // 705 / 8 = 88.125 exactly
        match summarize_pipeline(&deals) {
            PipelineSummary::Totals {
                average_close_probability,
                ..
            } => assert_eq!(average_close_probability, 88.12),
            other => panic!("Expected totals, got {:?}", other),
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(88.125), 88.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(87.5), 87.5);
        assert_eq!(round2(80.0), 80.0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = summarize_pipeline(&[]);
        assert!(summary.is_empty());
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({ "message": "No deals in pipeline." })
        );
    }

    #[test]
    fn test_summary_totals() {
        let summary = summarize_pipeline(&sample_deals());
        assert_eq!(
            summary,
            PipelineSummary::Totals {
                total_deals: 4,
                total_pipeline_value: 216_000,
                average_close_probability: 85.0,
                high_risk_deals: 0,
                high_value_deals: 2,
                deals_needing_attention: 2,
            }
        );
    }

    #[test]
    fn test_summary_rounds_average() {
        // (100 + 80 + 85) / 3 = 88.333..
        let deals = vec![
            Deal::new("A", "A", 1, STAGE_PROPOSAL),
            Deal::new("B", "B", 1, STAGE_PROPOSAL).with_age(0, 8),
            Deal::new("C", "C", 1, STAGE_PROPOSAL).with_age(31, 0),
        ];

        match summarize_pipeline(&deals) {
            PipelineSummary::Totals {
                average_close_probability,
                ..
            } => assert_eq!(average_close_probability, 88.33),
            other => panic!("Expected totals, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_counts_high_risk() {
        // The lowest reachable score is 65.
        let deals = vec![Deal::new("A", "A", 1, STAGE_PROPOSAL).with_age(365, 365)];
        match summarize_pipeline(&deals) {
            PipelineSummary::Totals {
                high_risk_deals, ..
            } => assert_eq!(high_risk_deals, 0),
            other => panic!("Expected totals, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_serializes_flat() {
        let value = serde_json::to_value(summarize_pipeline(&sample_deals())).unwrap();
        assert_eq!(value["total_deals"], 4);
        assert_eq!(value["total_pipeline_value"], 216_000);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_prioritize_sorted_descending() {
        let ranked = prioritize_deals(&sample_deals());
        let ids: Vec<_> = ranked.iter().map(|r| r.deal_id.as_str()).collect();
        assert_eq!(ids, vec!["D-2", "D-4", "D-1", "D-3"]);
        assert_eq!(ranked[0].close_probability, 110);
        assert_eq!(ranked[0].company, "Globex");
        assert_eq!(ranked[0].value, 20_000);
    }

    #[test]
    fn test_prioritize_ties_keep_input_order() {
        let deals = vec![
            Deal::new("first", "A", 1, STAGE_PROPOSAL),
            Deal::new("second", "B", 2, STAGE_DISCOVERY),
            Deal::new("third", "C", 3, "Qualified"),
        ];
        let ranked = prioritize_deals(&deals);
        let ids: Vec<_> = ranked.iter().map(|r| r.deal_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_prioritize_empty() {
        assert!(prioritize_deals(&[]).is_empty());
    }

    fn deal_strategy() -> impl Strategy<Value = Deal> {
        (
            "[a-z0-9]{1,8}",
            0u64..200_000,
            prop_oneof![
                Just(STAGE_DISCOVERY),
                Just(STAGE_PROPOSAL),
                Just(STAGE_NEGOTIATION),
                Just("Closed"),
            ],
            0u32..90,
            0u32..30,
        )
            .prop_map(|(id, value, stage, days, contact)| {
                Deal::new(id.clone(), id, value, stage).with_age(days, contact)
            })
    }

    proptest! {
        #[test]
        fn prop_ranking_is_non_increasing(deals in prop::collection::vec(deal_strategy(), 0..40)) {
            let ranked = prioritize_deals(&deals);
            prop_assert_eq!(ranked.len(), deals.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].close_probability >= pair[1].close_probability);
            }
        }

        #[test]
        fn prop_summary_counts_every_deal(deals in prop::collection::vec(deal_strategy(), 1..40)) {
            match summarize_pipeline(&deals) {
                PipelineSummary::Totals { total_deals, total_pipeline_value, .. } => {
                    prop_assert_eq!(total_deals, deals.len());
                    prop_assert_eq!(total_pipeline_value, deals.iter().map(|d| d.value).sum::<u64>());
                }
                PipelineSummary::Empty { .. } => prop_assert!(false, "non-empty input gave empty summary"),
            }
        }
    }
}
