//! The nine-field canvas record, its validation, and share-token rules.
//!
//! [`CanvasFields`] is the single typed representation of a canvas body. It is
//! used for save requests, stored snapshots, exports and the template copy, so
//! the field set is defined exactly once.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a single field, counted in Unicode scalar values.
///
/// Must match the `max` in the `#[validate(length(...))]` attributes below.
pub const MAX_FIELD_CHARS: usize = 10_000;

/// Share token of the owner-less template canvas seeded by the migrations.
pub const TEMPLATE_SHARE_TOKEN: &str = "demo-canvas";

/// Upper bound on share token length accepted by [`is_well_formed_share_token`].
pub const MAX_SHARE_TOKEN_LEN: usize = 128;

/// Field names in canvas layout order.
pub const FIELD_NAMES: [&str; 9] = [
    "key_partners",
    "key_activities",
    "value_propositions",
    "customer_relationships",
    "customer_segments",
    "key_resources",
    "channels",
    "cost_structure",
    "revenue_streams",
];

// ---------------------------------------------------------------------------
// CanvasFields
// ---------------------------------------------------------------------------

/// The nine text fields of a Business Model Canvas.
///
/// Every field is required on deserialization and unknown keys are rejected,
/// so a save request is always a complete record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CanvasFields {
    #[validate(length(max = 10000))]
    pub key_partners: String,
    #[validate(length(max = 10000))]
    pub key_activities: String,
    #[validate(length(max = 10000))]
    pub value_propositions: String,
    #[validate(length(max = 10000))]
    pub customer_relationships: String,
    #[validate(length(max = 10000))]
    pub customer_segments: String,
    #[validate(length(max = 10000))]
    pub key_resources: String,
    #[validate(length(max = 10000))]
    pub channels: String,
    #[validate(length(max = 10000))]
    pub cost_structure: String,
    #[validate(length(max = 10000))]
    pub revenue_streams: String,
}

impl CanvasFields {
    /// Field values paired with their names, in [`FIELD_NAMES`] order.
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            (FIELD_NAMES[0], self.key_partners.as_str()),
            (FIELD_NAMES[1], self.key_activities.as_str()),
            (FIELD_NAMES[2], self.value_propositions.as_str()),
            (FIELD_NAMES[3], self.customer_relationships.as_str()),
            (FIELD_NAMES[4], self.customer_segments.as_str()),
            (FIELD_NAMES[5], self.key_resources.as_str()),
            (FIELD_NAMES[6], self.channels.as_str()),
            (FIELD_NAMES[7], self.cost_structure.as_str()),
            (FIELD_NAMES[8], self.revenue_streams.as_str()),
        ]
    }

    /// Check the length cap on every field.
    ///
    /// Oversized input is rejected, never truncated, so the client and the
    /// server always agree on what was stored.
    pub fn validate_lengths(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errors| {
            CoreError::Validation(describe_field_errors(&errors))
        })
    }
}

/// Turn validator output into one stable, human-readable message.
fn describe_field_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_keys()
        .map(|name| name.to_string())
        .collect();
    fields.sort_by_key(|name| FIELD_NAMES.iter().position(|f| *f == name.as_str()));

    fields
        .iter()
        .map(|name| format!("{name} is too long (max {MAX_FIELD_CHARS} characters)"))
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Share tokens
// ---------------------------------------------------------------------------

/// Mint a new opaque share token.
pub fn generate_share_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Cheap syntactic check before hitting the database.
///
/// Accepts minted UUID tokens and named tokens such as
/// [`TEMPLATE_SHARE_TOKEN`]: non-empty, ASCII alphanumerics, `-` and `_`.
pub fn is_well_formed_share_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_SHARE_TOKEN_LEN
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(value: &str) -> CanvasFields {
        CanvasFields {
            key_partners: value.to_string(),
            key_activities: value.to_string(),
            value_propositions: value.to_string(),
            customer_relationships: value.to_string(),
            customer_segments: value.to_string(),
            key_resources: value.to_string(),
            channels: value.to_string(),
            cost_structure: value.to_string(),
            revenue_streams: value.to_string(),
        }
    }

    #[test]
    fn test_field_at_limit_is_accepted() {
        let mut fields = CanvasFields::default();
        fields.channels = "x".repeat(MAX_FIELD_CHARS);
        assert!(fields.validate_lengths().is_ok());
    }

    #[test]
    fn test_field_over_limit_is_rejected() {
        let mut fields = CanvasFields::default();
        fields.value_propositions = "x".repeat(MAX_FIELD_CHARS + 1);

        let err = fields.validate_lengths().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("value_propositions"));
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 10,000 three-byte characters is 30,000 bytes but still within the cap.
        let mut fields = CanvasFields::default();
        fields.key_resources = "€".repeat(MAX_FIELD_CHARS);
        assert!(fields.validate_lengths().is_ok());
    }

    #[test]
    fn test_multiple_oversized_fields_reported_in_layout_order() {
        let mut fields = CanvasFields::default();
        fields.revenue_streams = "x".repeat(MAX_FIELD_CHARS + 1);
        fields.key_partners = "x".repeat(MAX_FIELD_CHARS + 1);

        let msg = fields.validate_lengths().unwrap_err().to_string();
        let partners = msg.find("key_partners").unwrap();
        let revenue = msg.find("revenue_streams").unwrap();
        assert!(partners < revenue, "got: {msg}");
    }

    #[test]
    fn test_deserialize_rejects_missing_field() {
        let body = serde_json::json!({
            "key_partners": "a",
            "key_activities": "b",
            "value_propositions": "c",
            "customer_relationships": "d",
            "customer_segments": "e",
            "key_resources": "f",
            "channels": "g",
            "cost_structure": "h"
        });
        let result: Result<CanvasFields, _> = serde_json::from_value(body);
        assert!(result.is_err(), "revenue_streams is required");
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        let mut body = serde_json::to_value(filled("v")).unwrap();
        body["title"] = serde_json::json!("extra");
        let result: Result<CanvasFields, _> = serde_json::from_value(body);
        assert!(result.is_err(), "unknown keys must be rejected");
    }

    #[test]
    fn test_entries_follow_field_names() {
        let fields = filled("v");
        let names: Vec<&str> = fields.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, FIELD_NAMES);
    }

    #[test]
    fn test_generated_share_tokens_are_unique_and_well_formed() {
        let a = generate_share_token();
        let b = generate_share_token();
        assert_ne!(a, b);
        assert!(is_well_formed_share_token(&a));
        assert!(is_well_formed_share_token(TEMPLATE_SHARE_TOKEN));
    }

    #[test]
    fn test_malformed_share_tokens() {
        assert!(!is_well_formed_share_token(""));
        assert!(!is_well_formed_share_token("has space"));
        assert!(!is_well_formed_share_token("../etc/passwd"));
        assert!(!is_well_formed_share_token(&"a".repeat(MAX_SHARE_TOKEN_LEN + 1)));
    }
}
