//! Load status normalization.
//!
//! Loads carry raw status strings from two vocabularies: the broker/internal
//! one (`draft`, `posted`, `en_route`, ...) and the lifecycle one used by the
//! dispatch board (`available` through `completed`/`cancelled`). Shippers see a
//! third, coarser vocabulary. Everything here is a total function over
//! immutable tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Broker/internal status vocabulary.
pub const BROKER_STATUSES: [&str; 7] = [
    "draft",
    "posted",
    "assigned",
    "en_route",
    "delivered",
    "awaiting_docs",
    "paid",
];

/// Badge class for statuses outside the known vocabularies.
pub const DEFAULT_BADGE_CLASS: &str = "bg-gray-100 text-gray-800";

// ============================================================================
// Shipper vocabulary
// ============================================================================

/// Shipper-facing load status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipperStatus {
    New,
    Draft,
    Posted,
    #[serde(rename = "Carrier Assigned")]
    CarrierAssigned,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
    #[serde(rename = "POD Received")]
    PodReceived,
    Closed,
}

impl ShipperStatus {
    pub const ALL: [ShipperStatus; 8] = [
        ShipperStatus::New,
        ShipperStatus::Draft,
        ShipperStatus::Posted,
        ShipperStatus::CarrierAssigned,
        ShipperStatus::InTransit,
        ShipperStatus::Delivered,
        ShipperStatus::PodReceived,
        ShipperStatus::Closed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShipperStatus::New => "New",
            ShipperStatus::Draft => "Draft",
            ShipperStatus::Posted => "Posted",
            ShipperStatus::CarrierAssigned => "Carrier Assigned",
            ShipperStatus::InTransit => "In Transit",
            ShipperStatus::Delivered => "Delivered",
            ShipperStatus::PodReceived => "POD Received",
            ShipperStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for ShipperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Broker status -> shipper status. `completed` is the legacy closed-out
/// status still present on older loads.
pub const SHIPPER_STATUS_MAP: [(&str, ShipperStatus); 8] = [
    ("draft", ShipperStatus::Draft),
    ("posted", ShipperStatus::Posted),
    ("assigned", ShipperStatus::CarrierAssigned),
    ("en_route", ShipperStatus::InTransit),
    ("delivered", ShipperStatus::Delivered),
    ("awaiting_docs", ShipperStatus::PodReceived),
    ("paid", ShipperStatus::Closed),
    ("completed", ShipperStatus::Closed),
];

/// Translate a broker status to what the shipper sees.
///
/// Statuses missing from [`SHIPPER_STATUS_MAP`] read as `Draft`, including
/// ones the backend introduces later.
pub fn map_to_shipper_status(broker_status: &str) -> ShipperStatus {
    SHIPPER_STATUS_MAP
        .iter()
        .find(|(raw, _)| *raw == broker_status)
        .map(|(_, status)| *status)
        .unwrap_or_else(|| {
            debug!("No shipper mapping for status '{}', showing Draft", broker_status);
            ShipperStatus::Draft
        })
}

// ============================================================================
// Lifecycle vocabulary
// ============================================================================

/// Dispatch lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Available,
    Assigned,
    Dispatched,
    PickedUp,
    InTransit,
    Delivered,
    Completed,
    Cancelled,
}

impl LifecycleStatus {
    pub const INITIAL: LifecycleStatus = LifecycleStatus::Available;

    pub const ALL: [LifecycleStatus; 8] = [
        LifecycleStatus::Available,
        LifecycleStatus::Assigned,
        LifecycleStatus::Dispatched,
        LifecycleStatus::PickedUp,
        LifecycleStatus::InTransit,
        LifecycleStatus::Delivered,
        LifecycleStatus::Completed,
        LifecycleStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleStatus::Available => "available",
            LifecycleStatus::Assigned => "assigned",
            LifecycleStatus::Dispatched => "dispatched",
            LifecycleStatus::PickedUp => "picked_up",
            LifecycleStatus::InTransit => "in_transit",
            LifecycleStatus::Delivered => "delivered",
            LifecycleStatus::Completed => "completed",
            LifecycleStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// Legal successors. Every non-terminal state may be cancelled.
    pub fn next(self) -> &'static [LifecycleStatus] {
        use LifecycleStatus::*;
        match self {
            Available => &[Assigned, Cancelled],
            Assigned => &[Dispatched, Cancelled],
            Dispatched => &[PickedUp, Cancelled],
            PickedUp => &[InTransit, Cancelled],
            InTransit => &[Delivered, Cancelled],
            Delivered => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_empty()
    }

    pub fn can_transition_to(self, next: LifecycleStatus) -> bool {
        self.next().contains(&next)
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next statuses offered for a lifecycle status. Terminal and unknown
/// statuses have none.
pub fn next_status_options(status: &str) -> &'static [LifecycleStatus] {
    LifecycleStatus::parse(status)
        .map(LifecycleStatus::next)
        .unwrap_or(&[])
}

// ============================================================================
// Display helpers
// ============================================================================

/// Badge color classes for a raw status from either vocabulary.
pub fn status_badge_class(status: &str) -> &'static str {
    match status {
        "draft" => "bg-slate-100 text-slate-700",
        "posted" | "available" => "bg-blue-100 text-blue-800",
        "assigned" => "bg-indigo-100 text-indigo-800",
        "dispatched" => "bg-purple-100 text-purple-800",
        "picked_up" => "bg-amber-100 text-amber-800",
        "en_route" | "in_transit" => "bg-yellow-100 text-yellow-800",
        "delivered" => "bg-green-100 text-green-800",
        "awaiting_docs" => "bg-orange-100 text-orange-800",
        "paid" | "completed" => "bg-emerald-100 text-emerald-800",
        "cancelled" => "bg-red-100 text-red-800",
        _ => DEFAULT_BADGE_CLASS,
    }
}

/// `en_route` -> `En Route`.
pub fn format_load_status(status: &str) -> String {
    status
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Everything a status cell renders, for any raw status string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDisplay {
    pub status: String,
    pub label: String,
    pub badge_class: &'static str,
    pub shipper_status: ShipperStatus,
    pub next_statuses: &'static [LifecycleStatus],
}

pub fn status_display(status: &str) -> StatusDisplay {
    StatusDisplay {
        status: status.to_string(),
        label: format_load_status(status),
        badge_class: status_badge_class(status),
        shipper_status: map_to_shipper_status(status),
        next_statuses: next_status_options(status),
    }
}
