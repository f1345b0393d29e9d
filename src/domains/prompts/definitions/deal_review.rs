//! Deal review prompt definition.

use super::{PromptDefinition, argument};
use rmcp::model::PromptArgument;

/// Walks the assistant through reviewing one deal with the pipeline tools.
pub struct DealReviewPrompt;

impl PromptDefinition for DealReviewPrompt {
    const NAME: &'static str = "deal_review";
    const DESCRIPTION: &'static str =
        "Review a single deal: its health, close probability and next steps";

    fn template() -> &'static str {
        r#"Review deal {{deal_id}}.

1. Call `get_deal` with deal_id "{{deal_id}}" to load the record.
2. Call `score_deal` to get its close probability and risk level.
3. Call `suggest_next_action` for the recommended follow-up.

{{#if focus}}
Concentrate the review on: {{focus}}
{{else}}
Cover the deal's stage, how long it has been open, how recently the client
was contacted, and whether its value justifies extra attention.
{{/if}}
Finish with a short, concrete plan for the account owner."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("deal_id", "Identifier of the deal to review", true),
            argument(
                "focus",
                "Aspect to concentrate on (e.g. pricing, stakeholders, timeline)",
                false,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_review_metadata() {
        assert_eq!(DealReviewPrompt::NAME, "deal_review");

        let args = DealReviewPrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "deal_id");
        assert_eq!(args[0].required, Some(true));
        assert_eq!(args[1].required, Some(false));
    }
}
