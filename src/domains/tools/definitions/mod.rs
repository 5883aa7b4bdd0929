//! Tool definitions module.
//!
//! Each tool is defined in its own file under its group.

pub mod db;

pub use db::{
    DescribeTableParams, DescribeTableTool, GenerateMigrationParams, GenerateMigrationTool,
    ListTablesParams, ListTablesTool, MigrationFile, QueryDatabaseParams, QueryDatabaseTool,
};
