//! Resources domain module.
//!
//! Read-only JSON views of the TMS reference tables: role document
//! configurations, document types, the shipper status map and the load
//! lifecycle.
//!
//! ## Architecture
//!
//! - `definitions/` - Resource definitions and their JSON renderers
//! - `registry.rs` - Central resource and template registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::get_all_resources;
pub use service::{ResourceContent, ResourceEntry, ResourceService};
