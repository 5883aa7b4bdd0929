//! TMS reference tables.
//!
//! Immutable lookup tables that drive the load, document and tracking views:
//!
//! - `documents`: role -> document view configuration, document type labels
//! - `loads`: status vocabularies, shipper mapping, badges, lifecycle transitions
//!
//! Nothing here touches the database; the resources domain serves these tables
//! to MCP clients.

pub mod documents;
pub mod loads;

pub use documents::{
    CustomAction, Document, DocumentConfig, DocumentStatus, DocumentType, Role, doc_type_color,
    doc_type_icon, doc_type_label, document_config,
};
pub use loads::{
    DEFAULT_BADGE_CLASS, LifecycleStatus, ShipperStatus, StatusDisplay, format_load_status,
    map_to_shipper_status, next_status_options, status_badge_class, status_display,
};
