//! Per-deal snapshot resource template.

use std::borrow::Cow;

use rmcp::model::{AnnotateAble, RawResourceTemplate, ResourceTemplate};
use serde::Serialize;

use crate::domains::deals::{Deal, DealScore, Recommendation, recommend, score_deal};

/// `sales://deals/{deal_id}` - a deal together with its derived fields.
pub struct DealSnapshotTemplate;

impl DealSnapshotTemplate {
    pub const URI_TEMPLATE: &'static str = "sales://deals/{deal_id}";
    pub const PREFIX: &'static str = "sales://deals/";
    pub const NAME: &'static str = "Deal Snapshot";
    pub const MIME_TYPE: &'static str = "application/json";

    /// The deal id addressed by `uri`, if it matches this template.
    ///
    /// The id is a single percent-encoded path segment, so ids holding
    /// spaces or slashes are addressed as `%20` and `%2F`.
    pub fn deal_id(uri: &str) -> Option<Cow<'_, str>> {
        let segment = uri
            .strip_prefix(Self::PREFIX)
            .filter(|id| !id.is_empty() && !id.contains('/'))?;
        urlencoding::decode(segment).ok()
    }

    pub fn template() -> ResourceTemplate {
        RawResourceTemplate {
            uri_template: Self::URI_TEMPLATE.to_string(),
            name: Self::NAME.to_string(),
            title: Some("Deal Snapshot".to_string()),
            description: Some(
                "A deal record with its close probability, risk level and next actions"
                    .to_string(),
            ),
            mime_type: Some(Self::MIME_TYPE.to_string()),
        }
        .no_annotation()
    }

    pub fn snapshot(deal: &Deal) -> DealSnapshot<'_> {
        DealSnapshot {
            deal,
            score: score_deal(deal),
            recommendation: recommend(deal),
        }
    }
}

/// Body of a deal snapshot resource.
#[derive(Debug, Serialize)]
pub struct DealSnapshot<'a> {
    pub deal: &'a Deal,
    pub score: DealScore,
    pub recommendation: Recommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_id_from_uri() {
        assert_eq!(
            DealSnapshotTemplate::deal_id("sales://deals/D-1").as_deref(),
            Some("D-1")
        );
        assert_eq!(DealSnapshotTemplate::deal_id("sales://deals/"), None);
        assert_eq!(DealSnapshotTemplate::deal_id("sales://deals/a/b"), None);
        assert_eq!(DealSnapshotTemplate::deal_id("sales://pipeline/summary"), None);
    }

    #[test]
    fn test_deal_id_is_percent_decoded() {
        assert_eq!(
            DealSnapshotTemplate::deal_id("sales://deals/Q3%20renewal").as_deref(),
            Some("Q3 renewal")
        );
        assert_eq!(
            DealSnapshotTemplate::deal_id("sales://deals/EMEA%2F7").as_deref(),
            Some("EMEA/7")
        );
        assert_eq!(DealSnapshotTemplate::deal_id("sales://deals/%FF"), None);
    }

    #[test]
    fn test_snapshot_shape() {
        let deal = Deal::new("D-1", "Acme", 90_000, "Negotiation");
        let value = serde_json::to_value(DealSnapshotTemplate::snapshot(&deal)).unwrap();

        assert_eq!(value["deal"]["company"], "Acme");
        assert_eq!(value["score"]["close_probability"], 110);
        assert_eq!(value["score"]["risk_level"], "Low");
        assert_eq!(value["recommendation"]["priority"], "High");
    }
}
