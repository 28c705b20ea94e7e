//! Request authentication context.
//!
//! This service sits behind a gateway that authenticates API keys and
//! forwards the resolved organization in a trusted header. Handlers extract
//! [`OrgContext`] from request parts, so it also works alongside Multipart.

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use uuid::Uuid;

use crate::constants::ORGANIZATION_HEADER;
use crate::error::ErrorResponse;

/// Organization context extracted from the gateway header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgContext {
    pub organization_id: Uuid,
}

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
            details: None,
            error_type: None,
            code: "UNAUTHORIZED".to_string(),
            recoverable: false,
        }),
    )
}

impl<S> FromRequestParts<S> for OrgContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ORGANIZATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing organization header"))?;

        let organization_id = Uuid::parse_str(raw)
            .map_err(|_| unauthorized("Invalid organization header"))?;

        Ok(OrgContext { organization_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(value: Option<&str>) -> Result<OrgContext, StatusCode> {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(ORGANIZATION_HEADER, v);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        OrgContext::from_request_parts(&mut parts, &())
            .await
            .map_err(|(status, _)| status)
    }

    #[tokio::test]
    async fn test_extracts_valid_header() {
        let id = Uuid::new_v4();
        let ctx = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(ctx.organization_id, id);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        assert_eq!(extract(None).await.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        assert_eq!(
            extract(Some("not-a-uuid")).await.unwrap_err(),
            StatusCode::UNAUTHORIZED
        );
    }
}
