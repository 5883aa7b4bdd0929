//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! configuration, error handling, the SQL client, server lifecycle management,
//! and transport layer abstractions.

pub mod config;
pub mod database;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use database::{DatabaseError, PgClient, SqlClient};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
