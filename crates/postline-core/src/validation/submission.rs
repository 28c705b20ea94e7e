//! Submission shape validation.
//!
//! Turns a raw [`CreatePostRequest`] into a [`PostSubmission`] or reports the
//! first failure in document order. The checks run in a fixed sequence:
//! top-level fields first, then per target: integration reference, content
//! blocks in order, provider settings. The input is never mutated; callers
//! keep their request untouched on failure.

use chrono::{DateTime, Utc};

use crate::models::{
    BlockMedia, ContentBlock, ContentBlockRequest, CreatePostRequest, PostSubmission, PostTarget,
};
use crate::settings::ProviderSettings;

use super::content::{is_effectively_empty, is_valid_media_url};
use super::error::ValidationError;

/// Validate a submission against the current wall clock.
pub fn validate_submission(request: &CreatePostRequest) -> Result<PostSubmission, ValidationError> {
    validate_submission_at(request, Utc::now())
}

/// Validate a submission, checking schedule dates against `now`.
pub fn validate_submission_at(
    request: &CreatePostRequest,
    now: DateTime<Utc>,
) -> Result<PostSubmission, ValidationError> {
    let is_draft = request.post_type.is_draft();

    if !is_draft {
        let date = request.date.ok_or(ValidationError::MissingScheduleDate)?;
        if matches!(request.post_type, crate::models::PostType::Schedule) && date < now {
            return Err(ValidationError::ScheduleDateInPast);
        }
        if request.posts.is_empty() {
            return Err(ValidationError::NoTargets);
        }
    }

    let mut targets = Vec::with_capacity(request.posts.len());
    let mut seen_integrations: Vec<&str> = Vec::with_capacity(request.posts.len());

    for (target_idx, target) in request.posts.iter().enumerate() {
        let integration_id = target.integration.id.trim();
        if integration_id.is_empty() {
            return Err(ValidationError::MissingIntegrationId { target: target_idx });
        }
        if seen_integrations.contains(&integration_id) {
            return Err(ValidationError::DuplicateIntegration {
                target: target_idx,
                integration_id: integration_id.to_string(),
            });
        }
        seen_integrations.push(integration_id);

        if target.value.is_empty() {
            return Err(ValidationError::NoContentBlocks { target: target_idx });
        }

        let mut blocks = Vec::with_capacity(target.value.len());
        for (block_idx, block) in target.value.iter().enumerate() {
            blocks.push(validate_block(block, target_idx, block_idx)?);
        }

        let settings = ProviderSettings::resolve(&target.settings).map_err(|source| {
            ValidationError::Settings {
                target: target_idx,
                source,
            }
        })?;

        targets.push(PostTarget {
            integration_id: integration_id.to_string(),
            group: target.group.clone(),
            content_blocks: blocks,
            settings,
        });
    }

    Ok(PostSubmission {
        post_type: request.post_type,
        order: request.order.clone(),
        short_link: request.short_link,
        inter: request.inter,
        date: request.date,
        tags: request.tags.clone(),
        targets,
    })
}

fn validate_block(
    block: &ContentBlockRequest,
    target: usize,
    block_idx: usize,
) -> Result<ContentBlock, ValidationError> {
    if is_effectively_empty(&block.content) {
        return Err(ValidationError::EmptyContent {
            target,
            block: block_idx,
        });
    }

    // Empty arrays are noise from clients; normalize them away before the
    // conflict check.
    let image = block.image.as_ref().filter(|v| !v.is_empty());
    let urls = block.image_urls.as_ref().filter(|v| !v.is_empty());

    let media = match (image, urls) {
        (Some(_), Some(_)) => {
            return Err(ValidationError::ConflictingMedia {
                target,
                block: block_idx,
            })
        }
        (Some(image), None) => Some(BlockMedia::References {
            image: image.clone(),
        }),
        (None, Some(urls)) => {
            for url in urls {
                if !is_valid_media_url(url) {
                    return Err(ValidationError::InvalidMediaUrl {
                        target,
                        block: block_idx,
                        url: url.clone(),
                    });
                }
            }
            Some(BlockMedia::RawUrls { urls: urls.clone() })
        }
        (None, None) => None,
    };

    Ok(ContentBlock {
        content: block.content.clone(),
        id: block.id.clone(),
        media,
    })
}
