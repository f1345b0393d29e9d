//! Server info resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "sales://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Server name, version and deal store back-end";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::SystemInfo)
    }
}
