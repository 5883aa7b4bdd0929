//! Transport layer for the MCP server.
//!
//! - **STDIO**: Standard input/output (MCP default) - feature: `stdio`
//!
//! The transport handles the connection lifecycle and delegates message
//! processing to the MCP server handler.

mod config;
mod error;
mod service;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
