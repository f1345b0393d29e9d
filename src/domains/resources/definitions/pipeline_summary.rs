//! Pipeline summary resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Aggregate pipeline metrics, computed on every read.
pub struct PipelineSummaryResource;

impl ResourceDefinition for PipelineSummaryResource {
    const URI: &'static str = "sales://pipeline/summary";
    const NAME: &'static str = "Pipeline Summary";
    const DESCRIPTION: &'static str =
        "Deal count, total value, average close probability and risk counts";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::PipelineSummary)
    }
}
