//! Load status resources.

use serde_json::{Value, json};

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;
use crate::domains::tms::loads::{BROKER_STATUSES, SHIPPER_STATUS_MAP};
use crate::domains::tms::{LifecycleStatus, ShipperStatus, status_display};

/// Broker -> shipper status table.
pub struct StatusMapResource;

impl ResourceDefinition for StatusMapResource {
    const URI: &'static str = "tms://loads/status-map";
    const NAME: &'static str = "Shipper Status Map";
    const DESCRIPTION: &'static str = "How broker load statuses are shown to shippers, including the fallback for unmapped statuses";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::StatusMap
    }
}

/// Lifecycle transition table.
pub struct LifecycleResource;

impl ResourceDefinition for LifecycleResource {
    const URI: &'static str = "tms://loads/lifecycle";
    const NAME: &'static str = "Load Lifecycle";
    const DESCRIPTION: &'static str = "Load lifecycle statuses with their legal next statuses";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Lifecycle
    }
}

pub fn status_map_json() -> Value {
    let mapping: serde_json::Map<String, Value> = SHIPPER_STATUS_MAP
        .iter()
        .map(|(raw, status)| (raw.to_string(), Value::from(status.label())))
        .collect();

    json!({
        "brokerStatuses": BROKER_STATUSES,
        "shipperStatuses": ShipperStatus::ALL,
        "mapping": mapping,
        "fallback": ShipperStatus::Draft,
    })
}

pub fn lifecycle_json() -> Value {
    let transitions: serde_json::Map<String, Value> = LifecycleStatus::ALL
        .into_iter()
        .map(|s| (s.as_str().to_string(), json!(s.next())))
        .collect();
    let terminal: Vec<_> = LifecycleStatus::ALL
        .into_iter()
        .filter(|s| s.is_terminal())
        .collect();

    json!({
        "initial": LifecycleStatus::INITIAL,
        "terminal": terminal,
        "transitions": transitions,
    })
}

/// Display metadata for any raw status string.
pub fn status_json(status: &str) -> Result<Value, serde_json::Error> {
    serde_json::to_value(status_display(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_map_json() {
        let value = status_map_json();
        assert_eq!(value["mapping"]["en_route"], "In Transit");
        assert_eq!(value["mapping"]["awaiting_docs"], "POD Received");
        assert_eq!(value["fallback"], "Draft");
        assert_eq!(value["shipperStatuses"][3], "Carrier Assigned");
    }

    #[test]
    fn test_lifecycle_json() {
        let value = lifecycle_json();
        assert_eq!(value["initial"], "available");
        assert_eq!(value["terminal"], json!(["completed", "cancelled"]));
        assert_eq!(value["transitions"]["picked_up"], json!(["in_transit", "cancelled"]));
        assert_eq!(value["transitions"]["completed"], json!([]));
    }

    #[test]
    fn test_status_json() {
        let value = status_json("awaiting_docs").unwrap();
        assert_eq!(value["label"], "Awaiting Docs");
        assert_eq!(value["shipperStatus"], "POD Received");
        assert_eq!(value["badgeClass"], "bg-orange-100 text-orange-800");
        assert_eq!(value["nextStatuses"], json!([]));
    }
}
