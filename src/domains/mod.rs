//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tms**: role document configuration and load status tables
//! - **tools**: database tools MCP clients can call
//! - **resources**: read-only views of the tms tables

pub mod resources;
pub mod tms;
pub mod tools;
