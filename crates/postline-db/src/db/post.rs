use chrono::Utc;
use postline_core::models::{CreatedPostResponse, Post, PostSubmission};
use postline_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Post repository
///
/// Materializes validated submissions into stored rows and serves the read
/// side. One submission becomes one row per target, correlated by a shared
/// group id; deletes are soft so published history survives.
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

const POST_COLUMNS: &str = "id, organization_id, group_id, integration_id, state, publish_date, \
     content, settings, tags, short_link, created_at, updated_at";

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a validated submission in a single transaction.
    ///
    /// All targets share one freshly minted group id. A draft with no targets
    /// writes nothing and returns an empty post list. If any insert fails the
    /// whole transaction rolls back; no partial group is ever visible.
    #[tracing::instrument(
        skip(self, submission),
        fields(db.table = "posts", db.operation = "insert")
    )]
    pub async fn create_posts(
        &self,
        organization_id: Uuid,
        submission: &PostSubmission,
    ) -> Result<CreatedPostResponse, AppError> {
        let group_id = Uuid::new_v4();
        let state = submission.post_type.initial_state();
        let now = Utc::now();

        let tags = serde_json::to_value(&submission.tags)
            .map_err(|e| AppError::Internal(format!("Failed to serialize tags: {}", e)))?;

        let mut tx = self.pool.begin().await?;
        let mut posts = Vec::with_capacity(submission.targets.len());

        for target in &submission.targets {
            let content = serde_json::to_value(&target.content_blocks).map_err(|e| {
                AppError::Internal(format!("Failed to serialize content blocks: {}", e))
            })?;
            let settings = serde_json::to_value(&target.settings).map_err(|e| {
                AppError::Internal(format!("Failed to serialize settings: {}", e))
            })?;

            let post: Post = sqlx::query_as::<Postgres, Post>(
                r#"
                INSERT INTO posts (
                    id, organization_id, group_id, integration_id, state,
                    publish_date, content, settings, tags, short_link,
                    created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING id, organization_id, group_id, integration_id, state, publish_date,
                          content, settings, tags, short_link, created_at, updated_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(organization_id)
            .bind(group_id)
            .bind(&target.integration_id)
            .bind(state)
            .bind(submission.date)
            .bind(&content)
            .bind(&settings)
            .bind(&tags)
            .bind(submission.short_link)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

            posts.push(post);
        }

        tx.commit().await?;

        tracing::info!(
            group_id = %group_id,
            post_count = posts.len(),
            "Created post group"
        );

        Ok(CreatedPostResponse {
            group_id,
            state,
            posts,
        })
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn get_post(
        &self,
        organization_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<Postgres, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE id = $1 AND organization_id = $2 AND deleted_at IS NULL"
        ))
        .bind(post_id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Live posts of an organization within a publish-date window.
    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn list_posts(
        &self,
        organization_id: Uuid,
        week_start: chrono::DateTime<Utc>,
        week_end: chrono::DateTime<Utc>,
    ) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<Postgres, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE organization_id = $1 AND deleted_at IS NULL \
               AND publish_date >= $2 AND publish_date < $3 \
             ORDER BY publish_date, created_at"
        ))
        .bind(organization_id)
        .bind(week_start)
        .bind(week_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Soft-delete every row of a group.
    ///
    /// Returns the number of rows marked deleted; zero means the group does
    /// not exist (or belongs to another organization).
    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "update"))]
    pub async fn delete_group(
        &self,
        organization_id: Uuid,
        group_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE posts SET deleted_at = NOW(), updated_at = NOW() \
             WHERE group_id = $1 AND organization_id = $2 AND deleted_at IS NULL",
        )
        .bind(group_id)
        .bind(organization_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
