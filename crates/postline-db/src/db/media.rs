use postline_core::models::Media;
use postline_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Media repository
///
/// Records stored media objects. The bytes themselves live behind the storage
/// abstraction; this table only holds the addressable reference.
#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a stored file and hand back its row.
    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "insert"))]
    pub async fn save_file(
        &self,
        organization_id: Uuid,
        name: &str,
        path: &str,
    ) -> Result<Media, AppError> {
        let media = sqlx::query_as::<Postgres, Media>(
            r#"
            INSERT INTO media (id, organization_id, name, path, alt, thumbnail, created_at)
            VALUES ($1, $2, $3, $4, '', NULL, NOW())
            RETURNING id, organization_id, name, path, alt, thumbnail, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(organization_id)
        .bind(name)
        .bind(path)
        .fetch_one(&self.pool)
        .await?;

        Ok(media)
    }
}
