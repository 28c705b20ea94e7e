use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use postline_core::constants::FALLBACK_MEDIA_NAME;
use postline_core::models::MediaReference;
use postline_core::AppError;

use crate::auth::OrgContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/public/v1/upload",
    tag = "media",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Media stored", body = MediaReference),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(organization_id = %org.organization_id))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    org: OrgContext,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        .ok_or_else(|| AppError::BadRequest("Missing file field".to_string()))?;

    let filename = field
        .file_name()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(FALLBACK_MEDIA_NAME)
        .to_string();

    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    if !state.media.allowed_content_types.contains(&content_type) {
        return Err(
            AppError::BadRequest(format!("Unsupported content type: {}", content_type)).into(),
        );
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("File is empty".to_string()).into());
    }

    if data.len() > state.media.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            data.len(),
            state.media.max_upload_bytes
        ))
        .into());
    }

    let reference = state
        .media
        .store
        .store(org.organization_id, &filename, &content_type, data)
        .await?;

    Ok((StatusCode::CREATED, Json(reference)))
}
