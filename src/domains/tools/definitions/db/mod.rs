//! Database tools module.
//!
//! - `query`: forward arbitrary SQL (`query_database`)
//! - `list_tables` / `describe_table`: fixed catalog queries
//! - `generate_migration`: render a migration file without touching the database
//!
//! Every database failure is returned as an error-flagged tool result.

pub mod common;
pub mod describe_table;
pub mod generate_migration;
pub mod list_tables;
pub mod query;

pub use describe_table::{DescribeTableParams, DescribeTableTool};
pub use generate_migration::{GenerateMigrationParams, GenerateMigrationTool, MigrationFile};
pub use list_tables::{ListTablesParams, ListTablesTool};
pub use query::{QueryDatabaseParams, QueryDatabaseTool};
