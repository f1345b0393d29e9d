//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. Static
//! resources are served as registered; dynamic ones are computed from the
//! deal store on every read, so they always reflect the latest writes.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::definitions::DealSnapshotTemplate;
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::core::config::Config;
use crate::domains::deals::{DealStore, prioritize_deals, summarize_pipeline};

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Server configuration, for the info resource.
    config: Arc<Config>,

    /// Store behind the dynamic resources.
    store: Arc<dyn DealStore>,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata
    resources: BTreeMap<String, ResourceEntry>,

    /// Resource templates for parameterized resources.
    templates: Vec<ResourceTemplate>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Dynamic content that requires computation.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy)]
pub enum DynamicResourceType {
    /// Server name, version and store back-end.
    SystemInfo,

    /// Aggregate pipeline metrics.
    PipelineSummary,

    /// Deals ranked by close probability.
    PipelineRanking,
}

impl ResourceService {
    /// Create a new ResourceService over the given deal store.
    pub fn new(config: Arc<Config>, store: Arc<dyn DealStore>) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            config,
            store,
            resources: BTreeMap::new(),
            templates: Vec::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }
        service.templates = get_all_resource_templates();

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content = match self.resources.get(uri) {
            Some(entry) => match &entry.content {
                ResourceContent::Text(text) => ResourceContents::text(text, uri),
                ResourceContent::Dynamic(dynamic_type) => {
                    self.resolve_dynamic_content(uri, *dynamic_type)?
                }
            },
            None => self.resolve_template(uri)?,
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Resolve dynamic resource content.
    fn resolve_dynamic_content(
        &self,
        uri: &str,
        dynamic_type: DynamicResourceType,
    ) -> Result<ResourceContents, ResourceError> {
        match dynamic_type {
            DynamicResourceType::SystemInfo => {
                let info = serde_json::json!({
                    "server": self.config.server.name,
                    "version": self.config.server.version,
                    "store_backend": self.store.backend(),
                });
                json_contents(&info, uri)
            }
            DynamicResourceType::PipelineSummary => {
                let deals = self.store.get_all_deals()?;
                json_contents(&summarize_pipeline(&deals), uri)
            }
            DynamicResourceType::PipelineRanking => {
                let deals = self.store.get_all_deals()?;
                json_contents(&prioritize_deals(&deals), uri)
            }
        }
    }

    /// Resolve a URI against the registered templates.
    fn resolve_template(&self, uri: &str) -> Result<ResourceContents, ResourceError> {
        let deal_id =
            DealSnapshotTemplate::deal_id(uri).ok_or_else(|| ResourceError::not_found(uri))?;

        match self.store.get_deal(&deal_id)? {
            Some(deal) => json_contents(&DealSnapshotTemplate::snapshot(&deal), uri),
            None => {
                warn!("Deal snapshot requested for unknown deal: {}", deal_id);
                Err(ResourceError::not_found(uri))
            }
        }
    }
}

fn json_contents<T: Serialize>(value: &T, uri: &str) -> Result<ResourceContents, ResourceError> {
    Ok(ResourceContents::text(
        serde_json::to_string_pretty(value)?,
        uri,
    ))
}
