//! Wire models for Sierra change records, SCSB search rows, and the
//! outbound sync message
//!
//! Sierra decode payloads are permissive by design: deleted records arrive
//! with most fields absent, and eligibility checks (not deserialization)
//! decide whether a record is usable.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Title SCSB assigns to placeholder records awaiting full cataloging.
///
/// A placeholder's owning-bib-id is a temporary stand-in, never evidence
/// of a real ownership transfer.
pub const DUMMY_TITLE: &str = "Dummy Title";

/// A Sierra item's holding location
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of a Sierra item's fixed-field table, keyed by arbitrary
/// numeric position in the parent map
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixedField {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "deserialize_value_option")]
    pub value: Option<String>,
}

/// A decoded Sierra Item change record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    /// Owning bib ids; the first element is authoritative
    #[serde(default)]
    pub bib_ids: Vec<String>,
    /// `None` when the payload carried no fixed-field table at all —
    /// classification treats that as malformed, not as empty
    #[serde(default)]
    pub fixed_fields: Option<HashMap<String, FixedField>>,
}

impl Item {
    /// Location code, when the location object and its code are present
    pub fn location_code(&self) -> Option<&str> {
        self.location.as_ref()?.code.as_deref()
    }
}

/// A decoded Sierra Bib change record
#[derive(Debug, Clone, Deserialize)]
pub struct Bib {
    /// Sierra bib number, digits only (no `b` prefix, no check digit)
    pub id: String,
}

/// One top-level row of an SCSB search result
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteInventoryRecord {
    /// `.b`-prefixed, check-digit-padded owning bib id
    #[serde(default)]
    pub owning_institution_bib_id: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Child rows for serial / multi-part holdings
    #[serde(default)]
    pub search_item_result_rows: Vec<RemoteItemRecord>,
}

impl RemoteInventoryRecord {
    /// True for SCSB placeholder ("dummy") records awaiting cataloging
    pub fn is_placeholder(&self) -> bool {
        self.title.as_deref() == Some(DUMMY_TITLE)
    }

    /// This row's barcode followed by its child-row barcodes, in order,
    /// empty entries skipped, duplicates kept
    pub fn all_barcodes(&self) -> impl Iterator<Item = &str> {
        self.barcode
            .as_deref()
            .into_iter()
            .chain(
                self.search_item_result_rows
                    .iter()
                    .filter_map(|row| row.barcode.as_deref()),
            )
            .filter(|b| !b.is_empty())
    }
}

/// A nested item row inside a top-level SCSB search row
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteItemRecord {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub owning_institution_item_id: Option<String>,
}

/// The reconciliation instruction posted to the recap sync endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncMessage {
    /// Never empty: resolution yielding no barcodes means no message
    pub barcodes: Vec<String>,
    pub user_email: String,
    pub source: String,
    /// `"transfer"` when the record changed bib ownership; present
    /// together with `bib_id` or not at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Check-digit-padded, `b`-prefixed target bib number of a transfer
    #[serde(rename = "bibId", skip_serializing_if = "Option::is_none")]
    pub bib_id: Option<String>,
}

/// Accept fixed-field values as either strings or bare numbers; Sierra
/// emits both across export paths
fn deserialize_value_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_deserializes_from_decoded_payload() {
        let json = r#"{
            "id": "11907245",
            "barcode": "33433020768838",
            "location": { "code": "rc2ma", "name": "OFFSITE" },
            "bibIds": ["10079340"],
            "fixedFields": {
                "61": { "label": "Item Type", "value": "55" }
            }
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.barcode.as_deref(), Some("33433020768838"));
        assert_eq!(item.location_code(), Some("rc2ma"));
        assert_eq!(item.bib_ids, vec!["10079340"]);
        let ff = item.fixed_fields.unwrap();
        assert_eq!(ff["61"].value.as_deref(), Some("55"));
    }

    #[test]
    fn deleted_item_payload_deserializes_with_fields_absent() {
        let json = r#"{ "id": "11907245", "deleted": true }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.barcode.is_none());
        assert!(item.location.is_none());
        assert!(item.fixed_fields.is_none());
    }

    #[test]
    fn fixed_field_value_accepts_numbers() {
        let json = r#"{ "label": "Item Type", "value": 55 }"#;
        let field: FixedField = serde_json::from_str(json).unwrap();
        assert_eq!(field.value.as_deref(), Some("55"));
    }

    #[test]
    fn all_barcodes_flattens_in_order_keeping_duplicates() {
        let record = RemoteInventoryRecord {
            barcode: Some("b1".to_string()),
            search_item_result_rows: vec![
                RemoteItemRecord {
                    barcode: Some("b2".to_string()),
                    ..Default::default()
                },
                RemoteItemRecord {
                    barcode: None,
                    ..Default::default()
                },
                RemoteItemRecord {
                    barcode: Some("b1".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let barcodes: Vec<&str> = record.all_barcodes().collect();
        assert_eq!(barcodes, vec!["b1", "b2", "b1"]);
    }

    #[test]
    fn sync_message_omits_transfer_fields_when_absent() {
        let message = SyncMessage {
            barcodes: vec!["33433020768838".to_string()],
            user_email: "recap@example.com".to_string(),
            source: "bib-item-store-update".to_string(),
            action: None,
            bib_id: None,
        };

        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("action").is_none());
        assert!(json.get("bibId").is_none());
        assert_eq!(json["barcodes"][0], "33433020768838");
    }

    #[test]
    fn sync_message_serializes_transfer_fields_together() {
        let message = SyncMessage {
            barcodes: vec!["33433020768838".to_string()],
            user_email: "recap@example.com".to_string(),
            source: "bib-item-store-update".to_string(),
            action: Some("transfer".to_string()),
            bib_id: Some("b12348".to_string()),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["action"], "transfer");
        assert_eq!(json["bibId"], "b12348");
    }

    #[test]
    fn placeholder_detection_is_exact() {
        let mut record = RemoteInventoryRecord {
            title: Some("Dummy Title".to_string()),
            ..Default::default()
        };
        assert!(record.is_placeholder());

        record.title = Some("dummy title".to_string());
        assert!(!record.is_placeholder());
    }
}
