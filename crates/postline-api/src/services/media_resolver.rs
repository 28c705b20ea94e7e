//! Media resolution.
//!
//! Replaces raw external image URLs in a validated submission with stored
//! media references. URLs are resolved sequentially in document order; on the
//! first failure resolution stops and media stored for earlier URLs is kept.
//! A submission that carries no raw URLs passes through untouched.

use std::sync::Arc;

use postline_core::constants::FALLBACK_MEDIA_NAME;
use postline_core::models::{BlockMedia, ContentBlock, MediaReference, PostSubmission, PostTarget};
use postline_core::AppError;
use uuid::Uuid;

use super::traits::{MediaStore, UrlFetcher};

pub struct MediaResolver {
    fetcher: Arc<dyn UrlFetcher>,
    store: Arc<dyn MediaStore>,
}

impl MediaResolver {
    pub fn new(fetcher: Arc<dyn UrlFetcher>, store: Arc<dyn MediaStore>) -> Self {
        Self { fetcher, store }
    }

    /// Resolve every raw URL in the submission into a stored reference.
    #[tracing::instrument(skip(self, submission), fields(organization_id = %organization_id))]
    pub async fn resolve(
        &self,
        organization_id: Uuid,
        submission: PostSubmission,
    ) -> Result<PostSubmission, AppError> {
        let mut submission = submission;
        let incoming = std::mem::take(&mut submission.targets);
        let mut targets = Vec::with_capacity(incoming.len());

        for target in incoming {
            let PostTarget {
                integration_id,
                group,
                content_blocks,
                settings,
            } = target;

            let mut blocks = Vec::with_capacity(content_blocks.len());
            for block in content_blocks {
                blocks.push(self.resolve_block(organization_id, block).await?);
            }

            targets.push(PostTarget {
                integration_id,
                group,
                content_blocks: blocks,
                settings,
            });
        }

        submission.targets = targets;
        Ok(submission)
    }

    async fn resolve_block(
        &self,
        organization_id: Uuid,
        block: ContentBlock,
    ) -> Result<ContentBlock, AppError> {
        let ContentBlock { content, id, media } = block;

        let media = match media {
            Some(BlockMedia::RawUrls { urls }) => {
                let mut image = Vec::with_capacity(urls.len());
                for url in &urls {
                    image.push(self.resolve_url(organization_id, url).await?);
                }
                Some(BlockMedia::References { image })
            }
            other => other,
        };

        Ok(ContentBlock { content, id, media })
    }

    async fn resolve_url(
        &self,
        organization_id: Uuid,
        url: &str,
    ) -> Result<MediaReference, AppError> {
        let fetched = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| resolution_error(url, e))?;

        let name = display_name_from_url(url);

        let reference = self
            .store
            .store(organization_id, &name, &fetched.content_type, fetched.bytes)
            .await
            .map_err(|e| resolution_error(url, e))?;

        tracing::info!(url = %url, media_id = %reference.id, "Resolved external image");

        Ok(reference)
    }
}

fn resolution_error(url: &str, source: AppError) -> AppError {
    match source {
        already @ AppError::MediaResolution { .. } => already,
        other => AppError::MediaResolution {
            url: url.to_string(),
            reason: other.to_string(),
        },
    }
}

/// Display name for a fetched image: the last path segment of its URL.
/// A URL with no path, or one ending in a slash, gets the fallback name.
pub fn display_name_from_url(url: &str) -> String {
    let trimmed = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    let mut segments = after_scheme.split('/');
    let _host = segments.next();
    match segments.next_back() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => FALLBACK_MEDIA_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_last_segment() {
        assert_eq!(
            display_name_from_url("https://example.com/pics/cat.png"),
            "cat.png"
        );
        assert_eq!(
            display_name_from_url("https://example.com/pics/cat.png?w=100#frag"),
            "cat.png"
        );
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name_from_url("https://example.com/"), FALLBACK_MEDIA_NAME);
        assert_eq!(display_name_from_url("https://example.com"), FALLBACK_MEDIA_NAME);
        assert_eq!(
            display_name_from_url("https://example.com/pics/"),
            FALLBACK_MEDIA_NAME
        );
        assert_eq!(
            display_name_from_url("https://example.com/pics/?w=100"),
            FALLBACK_MEDIA_NAME
        );
    }
}
