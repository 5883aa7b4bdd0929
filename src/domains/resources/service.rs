//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. Registered
//! resources are served by exact URI; the two templates are matched by prefix
//! and resolved for whatever role or status the client fills in.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::definitions::{
    document_config_json, document_types_json, lifecycle_json, status_json, status_map_json,
};
use super::error::ResourceError;
use super::registry::{
    DOCUMENT_CONFIG_PREFIX, LOAD_STATUS_PREFIX, get_all_resource_templates, get_all_resources,
};
use crate::domains::tms::Role;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Registry of available resources, keyed by URI.
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

/// What a registered resource renders when read. Every resource is computed
/// from the TMS tables at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceContent {
    /// Document configuration of one role.
    DocumentConfig(Role),

    /// Document type labels, icons and colors.
    DocumentTypes,

    /// Broker -> shipper status table.
    StatusMap,

    /// Lifecycle transition table.
    Lifecycle,
}

impl ResourceService {
    /// Create a new ResourceService with every registered resource.
    pub fn new() -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            resources: BTreeMap::new(),
            templates: get_all_resource_templates(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
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
            Some(entry) => self.render(uri, entry.content)?,
            None => self.resolve_template(uri)?,
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Render a registered resource.
    fn render(&self, uri: &str, content: ResourceContent) -> Result<ResourceContents, ResourceError> {
        let value = match content {
            ResourceContent::DocumentConfig(role) => document_config_json(role.as_str())?,
            ResourceContent::DocumentTypes => document_types_json(),
            ResourceContent::StatusMap => status_map_json(),
            ResourceContent::Lifecycle => lifecycle_json(),
        };

        json_contents(uri, &value)
    }

    /// Resolve a URI that matches one of the templates. The filled-in segment
    /// is percent-decoded before lookup.
    fn resolve_template(&self, uri: &str) -> Result<ResourceContents, ResourceError> {
        let value = if let Some(role) = uri.strip_prefix(DOCUMENT_CONFIG_PREFIX) {
            document_config_json(&decode_segment(uri, role)?)?
        } else if let Some(status) = uri.strip_prefix(LOAD_STATUS_PREFIX) {
            status_json(&decode_segment(uri, status)?)?
        } else {
            return Err(ResourceError::not_found(uri));
        };

        json_contents(uri, &value)
    }
}

impl Default for ResourceService {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_segment<'a>(uri: &str, segment: &'a str) -> Result<Cow<'a, str>, ResourceError> {
    urlencoding::decode(segment).map_err(|e| {
        debug!("Cannot decode {}: {}", uri, e);
        ResourceError::not_found(uri)
    })
}

fn json_contents(uri: &str, value: &serde_json::Value) -> Result<ResourceContents, ResourceError> {
    Ok(ResourceContents::text(serde_json::to_string_pretty(value)?, uri))
}
