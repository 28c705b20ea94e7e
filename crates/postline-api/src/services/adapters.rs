//! Production implementations of the pipeline seams.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use postline_core::models::{
    CreatedPostResponse, Integration, MediaReference, Post, PostSubmission,
};
use postline_core::AppError;
use postline_db::{IntegrationRepository, MediaRepository, PostRepository};
use postline_storage::Storage;
use uuid::Uuid;

use super::traits::{FetchedMedia, IntegrationDirectory, MediaStore, PostStore, UrlFetcher};

/// Remote image fetcher backed by reqwest.
///
/// Enforces the http(s) scheme, a response status check, a content-type
/// allowlist, and a byte cap on the downloaded body.
pub struct HttpFetcher {
    client: reqwest::Client,
    allowed_content_types: Vec<String>,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new(
        timeout_secs: u64,
        allowed_content_types: Vec<String>,
        max_bytes: usize,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            allowed_content_types,
            max_bytes,
        })
    }
}

#[async_trait]
impl UrlFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedMedia, AppError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|_| AppError::BadRequest(format!("Invalid URL format: {}", url)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::BadRequest(
                "Only HTTP and HTTPS URLs are allowed".to_string(),
            ));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to download from URL: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::BadRequest(format!(
                "URL returned status code: {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        if !self.allowed_content_types.contains(&content_type) {
            return Err(AppError::BadRequest(format!(
                "Unsupported content type: {}",
                content_type
            )));
        }

        if let Some(length) = response.content_length() {
            if length as usize > self.max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "{} bytes exceeds max {} bytes",
                    length, self.max_bytes
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read response body: {}", e)))?;

        if bytes.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "{} bytes exceeds max {} bytes",
                bytes.len(),
                self.max_bytes
            )));
        }

        Ok(FetchedMedia {
            bytes,
            content_type,
        })
    }
}

/// Media store that uploads bytes to blob storage and records the reference.
#[derive(Clone)]
pub struct DbMediaStore {
    storage: Arc<dyn Storage>,
    media: MediaRepository,
}

impl DbMediaStore {
    pub fn new(storage: Arc<dyn Storage>, media: MediaRepository) -> Self {
        Self { storage, media }
    }
}

/// Keep display names readable in storage keys without trusting them.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .replace("..", "--")
}

#[async_trait]
impl MediaStore for DbMediaStore {
    async fn store(
        &self,
        organization_id: Uuid,
        display_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<MediaReference, AppError> {
        // Unique storage filename; the human-facing name is kept on the row.
        let filename = format!("{}-{}", Uuid::new_v4(), sanitize_filename(display_name));

        let (key, _url) = self
            .storage
            .upload(organization_id, &filename, content_type, data)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let media = self.media.save_file(organization_id, display_name, &key).await?;

        Ok(media.to_reference())
    }
}

/// Post store backed by the posts repository.
#[derive(Clone)]
pub struct DbPostStore {
    posts: PostRepository,
}

impl DbPostStore {
    pub fn new(posts: PostRepository) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl PostStore for DbPostStore {
    async fn create_posts(
        &self,
        organization_id: Uuid,
        submission: &PostSubmission,
    ) -> Result<CreatedPostResponse, AppError> {
        self.posts.create_posts(organization_id, submission).await
    }

    async fn find_post(
        &self,
        organization_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Post>, AppError> {
        self.posts.get_post(organization_id, post_id).await
    }

    async fn delete_group(
        &self,
        organization_id: Uuid,
        group_id: Uuid,
    ) -> Result<u64, AppError> {
        self.posts.delete_group(organization_id, group_id).await
    }
}

/// Integration directory backed by the integrations repository.
#[derive(Clone)]
pub struct DbIntegrationDirectory {
    integrations: IntegrationRepository,
}

impl DbIntegrationDirectory {
    pub fn new(integrations: IntegrationRepository) -> Self {
        Self { integrations }
    }
}

#[async_trait]
impl IntegrationDirectory for DbIntegrationDirectory {
    async fn get(
        &self,
        organization_id: Uuid,
        integration_id: &str,
    ) -> Result<Option<Integration>, AppError> {
        self.integrations.get(organization_id, integration_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("cat.png"), "cat.png");
        assert_eq!(sanitize_filename("my photo (1).png"), "my-photo--1-.png");
        assert!(!sanitize_filename("../../etc/passwd").contains(".."));
    }
}
