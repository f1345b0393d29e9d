//! Scoring rules documentation resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// The scoring and recommendation rules, as Markdown.
pub struct ScoringDocsResource;

impl ResourceDefinition for ScoringDocsResource {
    const URI: &'static str = "sales://docs/scoring";
    const NAME: &'static str = "Scoring Rules";
    const DESCRIPTION: &'static str =
        "How close probability, risk level, priority and next actions are derived";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(DOCUMENTATION.to_string())
    }
}

const DOCUMENTATION: &str = r#"# Deal Scoring Rules

## Close probability

Risk starts at 0:

| condition | risk |
|---|---|
| more than 30 days in pipeline | +15 |
| more than 7 days since last contact | +20 |
| stage is `Negotiation` | -10 |

`close_probability = max(5, 100 - risk)`. There is no upper cap, so a fresh
deal in negotiation scores 110.

## Risk level

| close probability | risk level |
|---|---|
| above 75 | Low |
| above 50 | Medium |
| otherwise | High |

## Priority

| deal value | priority |
|---|---|
| above 75,000 | High |
| above 30,000 | Medium |
| otherwise | Low |

## Next actions

Actions are added in this order:

1. More than 7 days since last contact: re-engage the client.
2. More than 30 days in pipeline: schedule a decision-maker meeting.
3. Stage `Discovery`: clarify requirements and budget.
   Stage `Proposal`: follow up on proposal feedback.
   Stage `Negotiation`: offer an incentive or revised pricing.
4. Nothing above applies: maintain a regular communication cadence.

## Pipeline summary

A deal is high risk when its close probability is below 50, high value when
its value is above 75,000, and needs attention when last contact was more
than 7 days ago. The average close probability is rounded to two decimals.
"#;
