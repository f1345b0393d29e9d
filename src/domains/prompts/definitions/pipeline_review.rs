//! Pipeline review prompt definition.

use super::{PromptDefinition, argument};
use rmcp::model::PromptArgument;

/// Summarizes the whole pipeline and where effort should go next.
pub struct PipelineReviewPrompt;

impl PromptDefinition for PipelineReviewPrompt {
    const NAME: &'static str = "pipeline_review";
    const DESCRIPTION: &'static str =
        "Review the whole pipeline and recommend where to focus this week";

    fn template() -> &'static str {
        r#"Prepare a pipeline review for {{#if audience}}{{audience}}{{else}}the sales team{{/if}}.

Call `summarize_pipeline` for the headline numbers, then `prioritize_deals`
for the ranking. For the three lowest-ranked deals, call `suggest_next_action`.

Report total value, average close probability, how many deals are high risk
and how many need attention, then list the deals to focus on with one action
each."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![argument(
            "audience",
            "Who the review is for (e.g. 'sales leadership')",
            false,
        )]
    }
}
