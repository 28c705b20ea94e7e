//! Seams between the ingestion pipeline and its collaborators.

use async_trait::async_trait;
use bytes::Bytes;
use postline_core::models::{
    CreatedPostResponse, Integration, MediaReference, Post, PostSubmission,
};
use postline_core::AppError;
use uuid::Uuid;

/// A fetched remote image: raw bytes plus the content type the origin served.
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Fetches raw bytes from an external URL.
#[async_trait]
pub trait UrlFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedMedia, AppError>;
}

/// Stores media bytes and hands back an addressable reference.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(
        &self,
        organization_id: Uuid,
        display_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<MediaReference, AppError>;
}

/// Persists validated submissions and serves group-level deletes.
/// `create_posts` is called exactly once per ingestion.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_posts(
        &self,
        organization_id: Uuid,
        submission: &PostSubmission,
    ) -> Result<CreatedPostResponse, AppError>;

    async fn find_post(
        &self,
        organization_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Post>, AppError>;

    async fn delete_group(&self, organization_id: Uuid, group_id: Uuid)
        -> Result<u64, AppError>;

    /// Resolve a post id to its group and delete every post in that group.
    /// Returns false when the post does not exist or belongs to another
    /// organization.
    async fn delete_post(&self, organization_id: Uuid, post_id: Uuid) -> Result<bool, AppError> {
        match self.find_post(organization_id, post_id).await? {
            Some(post) => Ok(self.delete_group(organization_id, post.group_id).await? > 0),
            None => Ok(false),
        }
    }
}

/// Looks up integrations owned by an organization.
#[async_trait]
pub trait IntegrationDirectory: Send + Sync {
    async fn get(
        &self,
        organization_id: Uuid,
        integration_id: &str,
    ) -> Result<Option<Integration>, AppError>;
}
