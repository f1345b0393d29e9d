//! Pipeline ranking resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Deals ranked by close probability, computed on every read.
pub struct PipelineRankingResource;

impl ResourceDefinition for PipelineRankingResource {
    const URI: &'static str = "sales://pipeline/ranking";
    const NAME: &'static str = "Pipeline Ranking";
    const DESCRIPTION: &'static str = "All deals ranked by close probability, highest first";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::PipelineRanking)
    }
}
