//! Shared key generation for storage backends.

use uuid::Uuid;

/// Generate a storage key for the given organization and filename.
///
/// Keys follow `media/{organization_id}/{filename}` so one organization can
/// never address another's files by name.
pub fn generate_storage_key(organization_id: Uuid, filename: &str) -> String {
    format!("media/{}/{}", organization_id, filename)
}
