//! Transport configuration types.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(not(feature = "stdio"))]
compile_error!("The stdio transport feature must be enabled");

/// Transport configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Stdio
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Load transport config from `MCP_TRANSPORT`.
    ///
    /// Only `stdio` is served; any other value is reported and ignored.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            "" | "stdio" => Self::default(),
            other => {
                warn!("Unsupported MCP_TRANSPORT '{}', falling back to stdio", other);
                Self::default()
            }
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stdio() {
        assert_eq!(TransportConfig::default(), TransportConfig::stdio());
        assert!(TransportConfig::default().description().contains("STDIO"));
    }
}
