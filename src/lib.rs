//! TMS MCP Server Library
//!
//! A Model Context Protocol server for the transportation-management system.
//! It gives MCP clients SQL access to the TMS database and publishes the
//! reference tables that drive the load and document views.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the SQL client, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tms**: role document configuration and load status normalization
//!   - **tools**: `query_database`, `list_tables`, `describe_table`, `generate_migration`
//!   - **resources**: JSON views of the tms tables
//!
//! # Example
//!
//! ```rust,no_run
//! use tms_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
