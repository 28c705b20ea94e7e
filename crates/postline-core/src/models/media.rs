use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// A stored, addressable media object, as opposed to a raw external URL.
///
/// References are assigned by the media store; this core only reads and
/// writes them, never the storage internals behind `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MediaReference {
    pub id: Uuid,
    pub path: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Database row for the media table.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Media {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub path: String,
    pub alt: String,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Media {
    /// Build the wire-level reference handed out to clients and embedded in
    /// content blocks.
    pub fn to_reference(&self) -> MediaReference {
        MediaReference {
            id: self.id,
            path: self.path.clone(),
            alt: self.alt.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }
}
