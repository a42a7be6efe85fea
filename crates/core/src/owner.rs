//! Canvas ownership.
//!
//! The store only ever sees an opaque [`OwnerId`]; mapping credentials to an
//! owner is the job of the API's auth layer. The owner-less template is a
//! named variant rather than a magic string at each call site.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, opaque identifier of a canvas owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<uuid::Uuid> for OwnerId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who a canvas belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasOwner {
    /// The single owner-less template new canvases are seeded from.
    Template,
    /// A regular user's canvas.
    User(OwnerId),
}

impl From<OwnerId> for CanvasOwner {
    fn from(id: OwnerId) -> Self {
        CanvasOwner::User(id)
    }
}
