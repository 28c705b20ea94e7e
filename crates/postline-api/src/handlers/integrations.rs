use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use postline_core::models::IntegrationResponse;

use crate::auth::OrgContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/public/v1/integrations",
    tag = "integrations",
    responses(
        (status = 200, description = "Integrations of the organization", body = [IntegrationResponse]),
        (status = 401, description = "Missing organization", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(organization_id = %org.organization_id))]
pub async fn list_integrations(
    State(state): State<Arc<AppState>>,
    org: OrgContext,
) -> Result<Json<Vec<IntegrationResponse>>, HttpAppError> {
    let integrations = state.db.integrations.list(org.organization_id).await?;
    Ok(Json(
        integrations.iter().map(|i| i.to_response()).collect(),
    ))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectedResponse {
    pub connected: bool,
}

/// Connectivity probe: reaching this handler means the gateway accepted the
/// caller's credentials and attached an organization.
#[utoipa::path(
    get,
    path = "/public/v1/is-connected",
    tag = "integrations",
    responses(
        (status = 200, description = "The caller is connected", body = ConnectedResponse),
        (status = 401, description = "Missing organization", body = ErrorResponse)
    )
)]
pub async fn is_connected(org: OrgContext) -> Json<ConnectedResponse> {
    tracing::debug!(organization_id = %org.organization_id, "Connectivity check");
    Json(ConnectedResponse { connected: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn is_connected_reports_true_for_any_organization() {
        let response = is_connected(OrgContext {
            organization_id: Uuid::new_v4(),
        })
        .await;
        assert!(response.0.connected);
    }
}
