//! Resource definitions module.
//!
//! Each resource is defined with:
//! - URI and metadata
//! - Content provider
//!
//! Role configurations are registered per role in `registry.rs` rather than
//! as one definition each.

pub mod documents;
pub mod loads;

pub use documents::{DocumentTypesResource, document_config_json, document_types_json};
pub use loads::{LifecycleResource, StatusMapResource, lifecycle_json, status_json, status_map_json};

use super::service::ResourceContent;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata and content.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}
