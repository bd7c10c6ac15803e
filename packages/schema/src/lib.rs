#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fixed field schema and row types for fund fact sheet extraction.
//!
//! The schema is the single source of truth for which fields a fact sheet
//! yields: the prompt builder uses it to render the JSON response skeleton
//! the model is asked to fill in, the field mapper uses it to complete
//! partial responses, and the exporter uses it as the column header order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fields extracted from every fund fact sheet, in output column order.
pub const FIELDS: &[&str] = &[
    "Product Name",
    "Fund Category",
    "Effective Date",
    "Currency",
    "Minimum Initial Subscription",
    "Valuation Period",
    "Subscription Fee",
    "Redemption Fee",
    "Switching Fee",
    "Management Fee",
    "Custodian Bank",
    "Custodian Fee",
    "ISIN Code",
    "Bloomberg Ticker",
    "Benchmark",
    "Risk Factor",
    "Risk Level",
    "Top Holdings",
    "Investment Policy",
    "Asset Allocation as of Reporting Date",
    "1 Month Return",
    "3 Month Return",
    "6 Month Return",
    "YTD",
    "1 Year Return",
    "3 Year Return",
    "5 Year Return",
    "Since Inception",
];

/// One output row, keyed by [`FIELDS`].
///
/// Invariant: after [`map_fields`] every schema field is present. Values
/// keep whatever JSON type the model returned (string, array, object);
/// rendering to text is the exporter's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord(serde_json::Map<String, Value>);

impl ExtractedRecord {
    /// Returns the value for `field`, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Number of fields held by this record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record holds no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Completes a parsed model response against the fixed schema.
///
/// For each field in [`FIELDS`], takes the object's value unchanged or
/// defaults to an empty string when the key is absent. Keys outside the
/// schema are dropped. Value domains (currency, risk level, fund category)
/// are advisory constraints communicated via the prompt, not enforced here.
#[must_use]
pub fn map_fields(object: &serde_json::Map<String, Value>) -> ExtractedRecord {
    let mut record = serde_json::Map::new();

    for field in FIELDS {
        let value = object
            .get(*field)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        record.insert((*field).to_owned(), value);
    }

    ExtractedRecord(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(json: &str) -> serde_json::Map<String, Value> {
        match serde_json::from_str(json).unwrap() {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn empty_object_defaults_every_field_to_empty_string() {
        let record = map_fields(&serde_json::Map::new());
        assert_eq!(record.len(), FIELDS.len());
        for field in FIELDS {
            assert_eq!(record.get(field), Some(&Value::String(String::new())));
        }
    }

    #[test]
    fn present_fields_pass_through_unchanged() {
        let record = map_fields(&object(
            r#"{"Product Name": "Alpha Fund", "Currency": "USD"}"#,
        ));
        assert_eq!(record.get("Product Name").unwrap(), &serde_json::json!("Alpha Fund"));
        assert_eq!(record.get("Currency").unwrap(), &serde_json::json!("USD"));
        assert_eq!(
            record.get("Management Fee"),
            Some(&Value::String(String::new()))
        );
    }

    #[test]
    fn non_string_values_are_not_coerced() {
        let record = map_fields(&object(
            r#"{"Top Holdings": ["Bond A", "Bond B"], "Risk Level": "Low"}"#,
        ));
        assert_eq!(
            record.get("Top Holdings").unwrap(),
            &serde_json::json!(["Bond A", "Bond B"])
        );
    }

    #[test]
    fn mapping_a_complete_record_is_idempotent() {
        let full = object(
            r#"{"Product Name": "Alpha Fund", "Fund Category": "Equity", "Risk Level": "High"}"#,
        );
        let once = map_fields(&full);
        let twice = map_fields(&once.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn keys_outside_the_schema_are_dropped() {
        let record = map_fields(&object(r#"{"Unexpected": "x", "YTD": "4.2%"}"#));
        assert_eq!(record.get("Unexpected"), None);
        assert_eq!(record.get("YTD").unwrap(), &serde_json::json!("4.2%"));
        assert_eq!(record.len(), FIELDS.len());
    }
}
