//! Tools domain module.
//!
//! The four database tools MCP clients can call:
//! `query_database`, `list_tables`, `describe_table`, `generate_migration`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder
//! - `registry.rs` - The fixed tool list
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
