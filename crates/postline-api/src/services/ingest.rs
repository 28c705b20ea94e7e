//! Ingestion orchestration.
//!
//! Runs one submission through the fixed pipeline: shape validation,
//! integration ownership checks, media resolution, then a single call into
//! the post store. Nothing is fetched or persisted for a submission that
//! fails validation.

use std::sync::Arc;

use postline_core::models::{CreatePostRequest, CreatedPostResponse};
use postline_core::{validate_submission, AppError};
use uuid::Uuid;

use super::media_resolver::MediaResolver;
use super::traits::{IntegrationDirectory, PostStore};

#[derive(Clone)]
pub struct IngestService {
    integrations: Arc<dyn IntegrationDirectory>,
    resolver: Arc<MediaResolver>,
    posts: Arc<dyn PostStore>,
}

impl IngestService {
    pub fn new(
        integrations: Arc<dyn IntegrationDirectory>,
        resolver: Arc<MediaResolver>,
        posts: Arc<dyn PostStore>,
    ) -> Self {
        Self {
            integrations,
            resolver,
            posts,
        }
    }

    /// Ingest one submission for the given organization.
    #[tracing::instrument(
        skip(self, request),
        fields(
            organization_id = %organization_id,
            post_type = ?request.post_type,
            target_count = request.posts.len(),
        )
    )]
    pub async fn ingest(
        &self,
        organization_id: Uuid,
        request: &CreatePostRequest,
    ) -> Result<CreatedPostResponse, AppError> {
        let submission = validate_submission(request)?;

        for target in &submission.targets {
            let integration = self
                .integrations
                .get(organization_id, &target.integration_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Integration {} not found",
                        target.integration_id
                    ))
                })?;

            if integration.disabled {
                return Err(AppError::BadRequest(format!(
                    "Integration {} is disabled",
                    target.integration_id
                )));
            }
        }

        let submission = if submission.has_raw_urls() {
            self.resolver.resolve(organization_id, submission).await?
        } else {
            submission
        };

        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string(&submission.to_request()) {
                Ok(payload) => tracing::debug!(payload = %payload, "Storing submission"),
                Err(e) => tracing::debug!(error = %e, "Could not serialize submission payload"),
            }
        }

        let response = self.posts.create_posts(organization_id, &submission).await?;

        tracing::info!(
            group_id = %response.group_id,
            state = ?response.state,
            post_count = response.posts.len(),
            "Submission ingested"
        );

        Ok(response)
    }
}
