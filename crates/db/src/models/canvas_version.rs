//! Canvas version model.
//!
//! Versions are immutable snapshots of a canvas's fields, taken right before
//! each save overwrites them.

use bmc_core::canvas::CanvasFields;
use bmc_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `canvas_versions` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CanvasVersion {
    pub id: DbId,
    pub canvas_id: DbId,
    pub version_number: i32,
    pub key_partners: String,
    pub key_activities: String,
    pub value_propositions: String,
    pub customer_relationships: String,
    pub customer_segments: String,
    pub key_resources: String,
    pub channels: String,
    pub cost_structure: String,
    pub revenue_streams: String,
    pub saved_at: Timestamp,
}

impl CanvasVersion {
    pub fn fields(&self) -> CanvasFields {
        CanvasFields {
            key_partners: self.key_partners.clone(),
            key_activities: self.key_activities.clone(),
            value_propositions: self.value_propositions.clone(),
            customer_relationships: self.customer_relationships.clone(),
            customer_segments: self.customer_segments.clone(),
            key_resources: self.key_resources.clone(),
            channels: self.channels.clone(),
            cost_structure: self.cost_structure.clone(),
            revenue_streams: self.revenue_streams.clone(),
        }
    }
}
