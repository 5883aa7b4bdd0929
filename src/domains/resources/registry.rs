//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, ResourceTemplate};

use super::definitions::{
    DocumentTypesResource, LifecycleResource, ResourceDefinition, StatusMapResource,
};
use super::service::{ResourceContent, ResourceEntry};
use crate::domains::tms::Role;

/// URI prefix of the per-role document configuration resources.
pub const DOCUMENT_CONFIG_PREFIX: &str = "tms://documents/config/";

/// URI prefix of the per-status display resources.
pub const LOAD_STATUS_PREFIX: &str = "tms://loads/status/";

/// Helper function to create an annotated resource from a definition.
fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

fn build_role_config(role: Role) -> ResourceEntry {
    let uri = format!("{}{}", DOCUMENT_CONFIG_PREFIX, role.as_str().to_lowercase());
    let mut raw = RawResource::new(uri, format!("{} Document Configuration", role));
    raw.description = Some(format!(
        "Document view configuration for the {} role",
        role.as_str().to_lowercase()
    ));
    raw.mime_type = Some("application/json".to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: ResourceContent::DocumentConfig(role),
    }
}

/// Get all registered resources as ResourceEntries.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    let mut resources: Vec<ResourceEntry> = Role::ALL.into_iter().map(build_role_config).collect();
    resources.push(build_resource::<DocumentTypesResource>());
    resources.push(build_resource::<StatusMapResource>());
    resources.push(build_resource::<LifecycleResource>());
    resources
}

/// Get all registered resource templates.
///
/// Resource templates use URI templates (RFC 6570) to describe
/// parameterized resources that clients can fill in.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: format!("{}{{role}}", DOCUMENT_CONFIG_PREFIX),
            name: "Role Document Configuration".to_string(),
            title: Some("Document configuration by role".to_string()),
            description: Some(
                "Document view configuration for any role; unknown roles resolve to BROKER"
                    .to_string(),
            ),
            mime_type: Some("application/json".to_string()),
        }
        .no_annotation(),
        RawResourceTemplate {
            uri_template: format!("{}{{status}}", LOAD_STATUS_PREFIX),
            name: "Load Status Display".to_string(),
            title: Some("Status label, badge and next statuses".to_string()),
            description: Some(
                "Display label, badge class, shipper status and next lifecycle statuses for a raw load status"
                    .to_string(),
            ),
            mime_type: Some("application/json".to_string()),
        }
        .no_annotation(),
    ]
}
