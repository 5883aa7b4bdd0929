//! Error types and handling for the MCP server.
//!
//! Tool and resource failures never surface here: they are reported to the
//! client as error results. This type covers startup and transport failures.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The SQL client could not be built from configuration.
    #[error("Database error: {0}")]
    Database(#[from] super::database::DatabaseError),

    /// Error from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
