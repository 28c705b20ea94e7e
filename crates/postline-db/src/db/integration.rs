use postline_core::models::Integration;
use postline_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Integration repository
///
/// Read-only here: integrations are provisioned by the connection flow
/// elsewhere, and the ingestion pipeline only verifies ownership and lists
/// them for clients.
#[derive(Clone)]
pub struct IntegrationRepository {
    pool: PgPool,
}

const INTEGRATION_COLUMNS: &str = "id, organization_id, name, provider_identifier, picture, \
     disabled, profile, customer_id, customer_name";

impl IntegrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "integrations", db.operation = "select"))]
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Integration>, AppError> {
        let integrations = sqlx::query_as::<Postgres, Integration>(&format!(
            "SELECT {INTEGRATION_COLUMNS} FROM integrations \
             WHERE organization_id = $1 AND deleted_at IS NULL \
             ORDER BY name"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(integrations)
    }

    #[tracing::instrument(skip(self), fields(db.table = "integrations", db.operation = "select"))]
    pub async fn get(
        &self,
        organization_id: Uuid,
        integration_id: &str,
    ) -> Result<Option<Integration>, AppError> {
        let integration = sqlx::query_as::<Postgres, Integration>(&format!(
            "SELECT {INTEGRATION_COLUMNS} FROM integrations \
             WHERE id = $1 AND organization_id = $2 AND deleted_at IS NULL"
        ))
        .bind(integration_id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(integration)
    }
}
