//! Tool Registry - the fixed list of tools this server exposes.

use super::definitions::{DescribeTableTool, GenerateMigrationTool, ListTablesTool, QueryDatabaseTool};

/// Tool registry - names and metadata of every available tool.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            QueryDatabaseTool::NAME,
            ListTablesTool::NAME,
            DescribeTableTool::NAME,
            GenerateMigrationTool::NAME,
        ]
    }

    /// Whether `name` is one of the registered tools.
    pub fn contains(name: &str) -> bool {
        Self::tool_names().contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(
            names,
            vec!["query_database", "list_tables", "describe_table", "generate_migration"]
        );
    }

    #[test]
    fn test_registry_contains() {
        assert!(ToolRegistry::contains("describe_table"));
        assert!(!ToolRegistry::contains("drop_database"));
        assert!(!ToolRegistry::contains(""));
    }
}
