//! Live canvas model.

use bmc_core::canvas::{CanvasFields, TEMPLATE_SHARE_TOKEN};
use bmc_core::owner::OwnerId;
use bmc_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `canvases` table.
///
/// `owner_id` is `None` only for the shared template.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Canvas {
    pub id: DbId,
    pub owner_id: Option<String>,
    pub key_partners: String,
    pub key_activities: String,
    pub value_propositions: String,
    pub customer_relationships: String,
    pub customer_segments: String,
    pub key_resources: String,
    pub channels: String,
    pub cost_structure: String,
    pub revenue_streams: String,
    pub share_token: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Canvas {
    /// Copy of the nine text fields.
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

    pub fn is_template(&self) -> bool {
        self.owner_id.is_none() && self.share_token == TEMPLATE_SHARE_TOKEN
    }

    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        self.owner_id.as_deref() == Some(owner.as_str())
    }
}

/// Response for `POST /canvases/{id}/share`.
#[derive(Debug, Clone, Serialize)]
pub struct ShareLink {
    pub share_token: String,
    pub share_url: String,
}
