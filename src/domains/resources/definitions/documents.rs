//! Document configuration resources.

use serde_json::{Value, json};

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;
use crate::domains::tms::{DocumentType, Role};

/// Every document type tag with its label, icon and color.
pub struct DocumentTypesResource;

impl ResourceDefinition for DocumentTypesResource {
    const URI: &'static str = "tms://documents/types";
    const NAME: &'static str = "Document Types";
    const DESCRIPTION: &'static str = "Document type tags (BOL, POD, ...) with display label, icon and color";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::DocumentTypes
    }
}

/// The resolved configuration for a role string (unknown roles get BROKER).
pub fn document_config_json(role: &str) -> Result<Value, serde_json::Error> {
    let resolved = Role::resolve(role);
    Ok(json!({
        "requestedRole": role,
        "resolvedRole": resolved,
        "config": serde_json::to_value(resolved.config())?,
    }))
}

pub fn document_types_json() -> Value {
    let types: Vec<Value> = DocumentType::ALL
        .into_iter()
        .map(|t| {
            json!({
                "type": t.tag(),
                "label": t.label(),
                "icon": t.icon(),
                "color": t.color(),
            })
        })
        .collect();

    json!({ "types": types, "fallback": DocumentType::Other.tag() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_resolves_to_broker() {
        let value = document_config_json("dispatcher").unwrap();
        assert_eq!(value["requestedRole"], "dispatcher");
        assert_eq!(value["resolvedRole"], "BROKER");
        assert_eq!(value["config"]["documentPrefix"], "BRK");
    }

    #[test]
    fn test_document_types_listing() {
        let value = document_types_json();
        assert_eq!(value["types"].as_array().map(Vec::len), Some(DocumentType::ALL.len()));
        assert_eq!(value["types"][0]["type"], "BOL");
        assert_eq!(value["types"][0]["label"], "Bill of Lading");
        assert_eq!(value["fallback"], "OTHER");
    }
}
