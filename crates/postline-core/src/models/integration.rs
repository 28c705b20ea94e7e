use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Database row for the integrations table.
///
/// Integrations are provisioned elsewhere; this core only reads them to
/// verify that a submission target belongs to the calling organization.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Integration {
    pub id: String,
    pub organization_id: Uuid,
    pub name: String,
    pub provider_identifier: String,
    pub picture: Option<String>,
    pub disabled: bool,
    pub profile: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
}

/// Customer attached to an integration, if any.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IntegrationCustomer {
    pub id: String,
    pub name: String,
}

/// Wire shape for the integrations listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IntegrationResponse {
    pub id: String,
    pub name: String,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<IntegrationCustomer>,
}

impl Integration {
    pub fn to_response(&self) -> IntegrationResponse {
        IntegrationResponse {
            id: self.id.clone(),
            name: self.name.clone(),
            identifier: self.provider_identifier.clone(),
            picture: self.picture.clone(),
            disabled: self.disabled,
            profile: self.profile.clone(),
            customer: match (&self.customer_id, &self.customer_name) {
                (Some(id), Some(name)) => Some(IntegrationCustomer {
                    id: id.clone(),
                    name: name.clone(),
                }),
                _ => None,
            },
        }
    }
}
