//! Role-based document configuration.
//!
//! Every role sees the document views through one immutable [`DocumentConfig`]:
//! which document types it may handle, which columns are shown, which
//! capabilities are enabled and which extra actions are offered per document.
//! The tables are plain statics; lookups never fail and fall back to the
//! broker configuration for anything that is not a known role.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

// ============================================================================
// Roles
// ============================================================================

/// User role that selects a document configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Broker,
    Carrier,
    Shipper,
}

impl Role {
    /// All known roles, in display order.
    pub const ALL: [Role; 3] = [Role::Broker, Role::Carrier, Role::Shipper];

    /// Canonical role key (`BROKER`, `CARRIER`, `SHIPPER`).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Broker => "BROKER",
            Role::Carrier => "CARRIER",
            Role::Shipper => "SHIPPER",
        }
    }

    /// Parse a role key. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BROKER" => Some(Role::Broker),
            "CARRIER" => Some(Role::Carrier),
            "SHIPPER" => Some(Role::Shipper),
            _ => None,
        }
    }

    /// Parse a role key, falling back to [`Role::Broker`].
    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            debug!("Unknown role '{}', using BROKER configuration", raw);
            Role::Broker
        })
    }

    /// The document configuration for this role.
    pub fn config(self) -> &'static DocumentConfig {
        match self {
            Role::Broker => &BROKER_CONFIG,
            Role::Carrier => &CARRIER_CONFIG,
            Role::Shipper => &SHIPPER_CONFIG,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Document types
// ============================================================================

/// Document type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Bill of Lading.
    Bol,
    /// Proof of Delivery.
    Pod,
    RateConfirmation,
    Invoice,
    /// Certificate of insurance.
    Insurance,
    W9,
    CarrierAgreement,
    LumperReceipt,
    ScaleTicket,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 10] = [
        DocumentType::Bol,
        DocumentType::Pod,
        DocumentType::RateConfirmation,
        DocumentType::Invoice,
        DocumentType::Insurance,
        DocumentType::W9,
        DocumentType::CarrierAgreement,
        DocumentType::LumperReceipt,
        DocumentType::ScaleTicket,
        DocumentType::Other,
    ];

    /// Wire tag of this type.
    pub fn tag(self) -> &'static str {
        match self {
            DocumentType::Bol => "BOL",
            DocumentType::Pod => "POD",
            DocumentType::RateConfirmation => "RATE_CONFIRMATION",
            DocumentType::Invoice => "INVOICE",
            DocumentType::Insurance => "INSURANCE",
            DocumentType::W9 => "W9",
            DocumentType::CarrierAgreement => "CARRIER_AGREEMENT",
            DocumentType::LumperReceipt => "LUMPER_RECEIPT",
            DocumentType::ScaleTicket => "SCALE_TICKET",
            DocumentType::Other => "OTHER",
        }
    }

    /// Parse a tag, case-insensitively.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.tag().eq_ignore_ascii_case(tag))
    }

    /// Parse a tag, falling back to [`DocumentType::Other`].
    pub fn resolve(tag: &str) -> Self {
        Self::parse(tag).unwrap_or(DocumentType::Other)
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Bol => "Bill of Lading",
            DocumentType::Pod => "Proof of Delivery",
            DocumentType::RateConfirmation => "Rate Confirmation",
            DocumentType::Invoice => "Invoice",
            DocumentType::Insurance => "Certificate of Insurance",
            DocumentType::W9 => "W-9",
            DocumentType::CarrierAgreement => "Carrier Agreement",
            DocumentType::LumperReceipt => "Lumper Receipt",
            DocumentType::ScaleTicket => "Scale Ticket",
            DocumentType::Other => "Other",
        }
    }

    /// Icon name used by the document list.
    pub fn icon(self) -> &'static str {
        match self {
            DocumentType::Bol => "file-text",
            DocumentType::Pod => "file-check",
            DocumentType::RateConfirmation => "file-signature",
            DocumentType::Invoice => "receipt",
            DocumentType::Insurance => "shield",
            DocumentType::W9 => "file-badge",
            DocumentType::CarrierAgreement => "handshake",
            DocumentType::LumperReceipt => "package",
            DocumentType::ScaleTicket => "scale",
            DocumentType::Other => "file",
        }
    }

    /// Color name used for the type chip.
    pub fn color(self) -> &'static str {
        match self {
            DocumentType::Bol => "blue",
            DocumentType::Pod => "green",
            DocumentType::RateConfirmation => "purple",
            DocumentType::Invoice => "amber",
            DocumentType::Insurance => "teal",
            DocumentType::W9 => "indigo",
            DocumentType::CarrierAgreement => "cyan",
            DocumentType::LumperReceipt => "orange",
            DocumentType::ScaleTicket => "slate",
            DocumentType::Other => "gray",
        }
    }
}

/// Human label for a document type tag. Unknown tags read "Other".
pub fn doc_type_label(tag: &str) -> &'static str {
    DocumentType::resolve(tag).label()
}

/// Icon name for a document type tag. Unknown tags use the generic file icon.
pub fn doc_type_icon(tag: &str) -> &'static str {
    DocumentType::resolve(tag).icon()
}

/// Color name for a document type tag. Unknown tags are gray.
pub fn doc_type_color(tag: &str) -> &'static str {
    DocumentType::resolve(tag).color()
}

// ============================================================================
// Documents and custom actions
// ============================================================================

/// Review state of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// The document fields custom action predicates look at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub doc_type: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub load_id: Option<String>,
    #[serde(default)]
    pub signed: bool,
}

impl Document {
    fn kind(&self) -> DocumentType {
        DocumentType::resolve(&self.doc_type)
    }
}

/// An extra, role-specific action offered on a document when its condition holds.
#[derive(Clone, Copy, Serialize)]
pub struct CustomAction {
    pub name: &'static str,
    pub icon: &'static str,
    #[serde(skip)]
    pub condition: fn(&Document) -> bool,
}

impl CustomAction {
    /// Whether this action applies to the given document.
    pub fn applies_to(&self, doc: &Document) -> bool {
        (self.condition)(doc)
    }
}

impl fmt::Debug for CustomAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAction")
            .field("name", &self.name)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

fn unsigned_rate_confirmation(doc: &Document) -> bool {
    doc.kind() == DocumentType::RateConfirmation && !doc.signed
}

fn pending_review(doc: &Document) -> bool {
    doc.status == DocumentStatus::Pending
}

fn shareable_with_carrier(doc: &Document) -> bool {
    matches!(doc.kind(), DocumentType::Bol | DocumentType::RateConfirmation)
        && doc.load_id.is_some()
}

fn billable_paperwork(doc: &Document) -> bool {
    matches!(doc.kind(), DocumentType::Pod | DocumentType::Invoice)
        && doc.load_id.is_some()
        && doc.status != DocumentStatus::Rejected
}

fn rejected(doc: &Document) -> bool {
    doc.status == DocumentStatus::Rejected
}

fn approved_pod(doc: &Document) -> bool {
    doc.kind() == DocumentType::Pod && doc.status == DocumentStatus::Approved
}

fn disputable_invoice(doc: &Document) -> bool {
    doc.kind() == DocumentType::Invoice && doc.status != DocumentStatus::Rejected
}

// ============================================================================
// Configuration
// ============================================================================

const GIB: u64 = 1024 * 1024 * 1024;

/// Document view configuration for one role.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConfig {
    pub role: Role,
    pub allowed_types: &'static [DocumentType],
    /// Prefix for generated document numbers.
    pub document_prefix: &'static str,
    pub visible_columns: &'static [&'static str],
    pub can_preview: bool,
    pub can_upload: bool,
    pub can_delete: bool,
    pub can_share: bool,
    pub can_print: bool,
    pub custom_actions: &'static [CustomAction],
    pub api_endpoint: &'static str,
    pub page_size: u32,
    pub allow_bulk_download: bool,
    pub requires_approval: bool,
    pub document_categories: &'static [&'static str],
    /// Storage quota in bytes; `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_quota: Option<u64>,
}

impl DocumentConfig {
    /// Whether the role may handle documents with this tag.
    pub fn allows(&self, tag: &str) -> bool {
        DocumentType::parse(tag).is_some_and(|t| self.allowed_types.contains(&t))
    }

    /// Custom actions whose condition holds for `doc`, in configured order.
    pub fn actions_for(&self, doc: &Document) -> Vec<&'static CustomAction> {
        self.custom_actions
            .iter()
            .filter(|action| action.applies_to(doc))
            .collect()
    }

    /// Document number for the given sequence, e.g. `BRK-000042`.
    pub fn document_number(&self, seq: u64) -> String {
        format!("{}-{:06}", self.document_prefix, seq)
    }
}

static BROKER_CONFIG: DocumentConfig = DocumentConfig {
    role: Role::Broker,
    allowed_types: &DocumentType::ALL,
    document_prefix: "BRK",
    visible_columns: &[
        "documentNumber",
        "type",
        "loadNumber",
        "carrier",
        "shipper",
        "status",
        "uploadedBy",
        "uploadedAt",
    ],
    can_preview: true,
    can_upload: true,
    can_delete: true,
    can_share: true,
    can_print: true,
    custom_actions: &[
        CustomAction {
            name: "Request Signature",
            icon: "pen-tool",
            condition: unsigned_rate_confirmation,
        },
        CustomAction {
            name: "Approve",
            icon: "check-circle",
            condition: pending_review,
        },
        CustomAction {
            name: "Send to Carrier",
            icon: "send",
            condition: shareable_with_carrier,
        },
    ],
    api_endpoint: "/api/broker/documents",
    page_size: 25,
    allow_bulk_download: true,
    requires_approval: false,
    document_categories: &["Load Documents", "Carrier Compliance", "Billing", "Other"],
    storage_quota: None,
};

static CARRIER_CONFIG: DocumentConfig = DocumentConfig {
    role: Role::Carrier,
    allowed_types: &[
        DocumentType::Bol,
        DocumentType::Pod,
        DocumentType::RateConfirmation,
        DocumentType::Invoice,
        DocumentType::Insurance,
        DocumentType::W9,
        DocumentType::CarrierAgreement,
        DocumentType::LumperReceipt,
        DocumentType::ScaleTicket,
    ],
    document_prefix: "CAR",
    visible_columns: &["documentNumber", "type", "loadNumber", "status", "uploadedAt"],
    can_preview: true,
    can_upload: true,
    can_delete: false,
    can_share: false,
    can_print: true,
    custom_actions: &[
        CustomAction {
            name: "Sign",
            icon: "pen-tool",
            condition: unsigned_rate_confirmation,
        },
        CustomAction {
            name: "Submit for Payment",
            icon: "dollar-sign",
            condition: billable_paperwork,
        },
        CustomAction {
            name: "Re-upload",
            icon: "upload",
            condition: rejected,
        },
    ],
    api_endpoint: "/api/carrier/documents",
    page_size: 20,
    allow_bulk_download: false,
    requires_approval: true,
    document_categories: &["Load Documents", "Compliance", "Payments"],
    storage_quota: Some(5 * GIB),
};

static SHIPPER_CONFIG: DocumentConfig = DocumentConfig {
    role: Role::Shipper,
    allowed_types: &[
        DocumentType::Bol,
        DocumentType::Pod,
        DocumentType::Invoice,
        DocumentType::Other,
    ],
    document_prefix: "SHP",
    visible_columns: &["documentNumber", "type", "loadNumber", "status", "uploadedAt"],
    can_preview: true,
    can_upload: true,
    can_delete: false,
    can_share: true,
    can_print: true,
    custom_actions: &[
        CustomAction {
            name: "Download POD",
            icon: "download",
            condition: approved_pod,
        },
        CustomAction {
            name: "Dispute",
            icon: "alert-triangle",
            condition: disputable_invoice,
        },
    ],
    api_endpoint: "/api/shipper/documents",
    page_size: 15,
    allow_bulk_download: false,
    requires_approval: false,
    document_categories: &["Shipments", "Invoices", "Other"],
    storage_quota: Some(GIB),
};

/// Document configuration for a role string. Unknown or empty roles get the
/// broker configuration.
pub fn document_config(role: &str) -> &'static DocumentConfig {
    Role::resolve(role).config()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(doc_type: &str) -> Document {
        Document {
            id: "doc-1".to_string(),
            doc_type: doc_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_known_roles_resolve_to_their_config() {
        for role in Role::ALL {
            assert_eq!(document_config(role.as_str()).role, role);
        }
        assert_eq!(document_config("carrier").role, Role::Carrier);
        assert_eq!(document_config("  Shipper ").role, Role::Shipper);
    }

    #[test]
    fn test_unknown_roles_fall_back_to_broker() {
        let broker = document_config("BROKER");
        for role in ["", "ADMIN", "dispatcher", "BROKERS", "null"] {
            assert!(std::ptr::eq(document_config(role), broker), "role {role:?}");
        }
    }

    #[test]
    fn test_doc_type_lookups() {
        assert_eq!(doc_type_label("BOL"), "Bill of Lading");
        assert_eq!(doc_type_label("pod"), "Proof of Delivery");
        assert_eq!(doc_type_icon("INVOICE"), "receipt");
        assert_eq!(doc_type_color("RATE_CONFIRMATION"), "purple");
    }

    #[test]
    fn test_unknown_doc_type_is_other() {
        assert_eq!(doc_type_label("CUSTOMS_FORM"), "Other");
        assert_eq!(doc_type_icon(""), "file");
        assert_eq!(doc_type_color("???"), "gray");
    }

    #[test]
    fn test_tags_round_trip_through_parse() {
        for t in DocumentType::ALL {
            assert_eq!(DocumentType::parse(t.tag()), Some(t));
        }
    }

    #[test]
    fn test_allowed_types() {
        let shipper = Role::Shipper.config();
        assert!(shipper.allows("BOL"));
        assert!(!shipper.allows("W9"));
        assert!(!shipper.allows("NOT_A_TYPE"));
        assert!(Role::Broker.config().allows("scale_ticket"));
    }

    #[test]
    fn test_broker_actions_follow_document_state() {
        let broker = Role::Broker.config();

        let mut rate_con = doc("RATE_CONFIRMATION");
        rate_con.load_id = Some("L-100".to_string());
        let names: Vec<_> = broker.actions_for(&rate_con).iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Request Signature", "Approve", "Send to Carrier"]);

        rate_con.signed = true;
        rate_con.status = DocumentStatus::Approved;
        let names: Vec<_> = broker.actions_for(&rate_con).iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Send to Carrier"]);
    }

    #[test]
    fn test_carrier_and_shipper_actions() {
        let mut pod = doc("POD");
        pod.load_id = Some("L-7".to_string());
        pod.status = DocumentStatus::Approved;

        let carrier: Vec<_> = Role::Carrier
            .config()
            .actions_for(&pod)
            .iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(carrier, vec!["Submit for Payment"]);

        let shipper: Vec<_> = Role::Shipper
            .config()
            .actions_for(&pod)
            .iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(shipper, vec!["Download POD"]);

        pod.status = DocumentStatus::Rejected;
        let carrier: Vec<_> = Role::Carrier
            .config()
            .actions_for(&pod)
            .iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(carrier, vec!["Re-upload"]);
    }

    #[test]
    fn test_document_number() {
        assert_eq!(Role::Carrier.config().document_number(42), "CAR-000042");
    }

    #[test]
    fn test_config_serializes_in_camel_case() {
        let value = serde_json::to_value(Role::Carrier.config()).unwrap();
        assert_eq!(value["role"], "CARRIER");
        assert_eq!(value["documentPrefix"], "CAR");
        assert_eq!(value["pageSize"], 20);
        assert_eq!(value["canDelete"], false);
        assert_eq!(value["allowedTypes"][0], "BOL");
        assert_eq!(value["customActions"][0]["name"], "Sign");
        assert!(value["customActions"][0].get("condition").is_none());
        assert_eq!(value["storageQuota"], 5 * GIB);

        let broker = serde_json::to_value(Role::Broker.config()).unwrap();
        assert!(broker.get("storageQuota").is_none());
    }
}
