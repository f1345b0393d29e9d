//! Deal record and update payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stage label for early qualification.
pub const STAGE_DISCOVERY: &str = "Discovery";

/// Stage label once a proposal has been sent.
pub const STAGE_PROPOSAL: &str = "Proposal";

/// Stage label for deals in commercial negotiation.
pub const STAGE_NEGOTIATION: &str = "Negotiation";

/// Message returned to callers when a `deal_id` cannot be resolved.
pub const DEAL_NOT_FOUND: &str = "Deal not found";

/// A sales pipeline deal.
///
/// `stage` is an open set compared by exact string match; the well-known
/// values are the `STAGE_*` constants. Counters are unsigned, so negative
/// values are rejected when a deal is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Deal {
    /// Unique identifier, immutable after creation.
    pub deal_id: String,

    /// Display name of the client company.
    pub company: String,

    /// Monetary value of the deal.
    pub value: u64,

    /// Pipeline stage (e.g. "Discovery", "Proposal", "Negotiation").
    pub stage: String,

    /// Days since the deal entered the pipeline.
    #[serde(default)]
    pub days_in_pipeline: u32,

    /// Days since the last client contact.
    #[serde(default)]
    pub last_contact_days: u32,
}

impl Deal {
    /// Create a freshly opened deal with both aging counters at zero.
    pub fn new(
        deal_id: impl Into<String>,
        company: impl Into<String>,
        value: u64,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            deal_id: deal_id.into(),
            company: company.into(),
            value,
            stage: stage.into(),
            days_in_pipeline: 0,
            last_contact_days: 0,
        }
    }

    /// Set both aging counters.
    pub fn with_age(mut self, days_in_pipeline: u32, last_contact_days: u32) -> Self {
        self.days_in_pipeline = days_in_pipeline;
        self.last_contact_days = last_contact_days;
        self
    }

    /// Apply an update in place. Counters left as `None` are not touched.
    pub fn apply(&mut self, update: &DealUpdate) {
        self.company = update.company.clone();
        self.value = update.value;
        self.stage = update.stage.clone();

        if let Some(days) = update.days_in_pipeline {
            self.days_in_pipeline = days;
        }
        if let Some(days) = update.last_contact_days {
            self.last_contact_days = days;
        }
    }

    /// The list view of this deal.
    pub fn summary(&self) -> DealSummary {
        DealSummary {
            deal_id: self.deal_id.clone(),
            company: self.company.clone(),
        }
    }
}

/// Fields overwritten by an update.
///
/// `company`, `value` and `stage` are always replaced. The aging counters
/// are only replaced when explicitly provided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealUpdate {
    pub company: String,
    pub value: u64,
    pub stage: String,
    #[serde(default)]
    pub days_in_pipeline: Option<u32>,
    #[serde(default)]
    pub last_contact_days: Option<u32>,
}

impl DealUpdate {
    /// Update that keeps the aging counters unchanged.
    pub fn new(company: impl Into<String>, value: u64, stage: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            value,
            stage: stage.into(),
            days_in_pipeline: None,
            last_contact_days: None,
        }
    }
}

/// Identifier and company name, as returned by `list_open_deals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DealSummary {
    pub deal_id: String,
    pub company: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deal_has_zero_counters() {
        let deal = Deal::new("D-1", "Acme", 50_000, STAGE_PROPOSAL);
        assert_eq!(deal.days_in_pipeline, 0);
        assert_eq!(deal.last_contact_days, 0);
        assert_eq!(deal.stage, "Proposal");
    }

    #[test]
    fn test_apply_update_keeps_counters_by_default() {
        let mut deal = Deal::new("D-1", "Acme", 50_000, STAGE_PROPOSAL).with_age(40, 9);
        deal.apply(&DealUpdate::new("Acme Corp", 90_000, STAGE_NEGOTIATION));

        assert_eq!(deal.company, "Acme Corp");
        assert_eq!(deal.value, 90_000);
        assert_eq!(deal.stage, STAGE_NEGOTIATION);
        assert_eq!(deal.days_in_pipeline, 40);
        assert_eq!(deal.last_contact_days, 9);
    }

    #[test]
    fn test_apply_update_with_counters() {
        let mut deal = Deal::new("D-1", "Acme", 50_000, STAGE_PROPOSAL).with_age(40, 9);
        let update = DealUpdate {
            last_contact_days: Some(0),
            ..DealUpdate::new("Acme", 50_000, STAGE_PROPOSAL)
        };
        deal.apply(&update);

        assert_eq!(deal.days_in_pipeline, 40);
        assert_eq!(deal.last_contact_days, 0);
    }

    #[test]
    fn test_deserialize_rejects_negative_value() {
        let json = serde_json::json!({
            "deal_id": "D-1",
            "company": "Acme",
            "value": -5,
            "stage": "Discovery"
        });
        assert!(serde_json::from_value::<Deal>(json).is_err());
    }

    #[test]
    fn test_deserialize_defaults_counters() {
        let json = serde_json::json!({
            "deal_id": "D-1",
            "company": "Acme",
            "value": 5,
            "stage": "Discovery"
        });
        let deal: Deal = serde_json::from_value(json).unwrap();
        assert_eq!(deal, Deal::new("D-1", "Acme", 5, STAGE_DISCOVERY));
    }
}
