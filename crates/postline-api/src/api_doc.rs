//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use postline_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Postline API",
        version = "0.1.0",
        description = "Post ingestion API: validates multi-provider submissions, resolves external media, and stores scheduled posts. All endpoints are versioned under /public/v1/."
    ),
    paths(
        handlers::posts::create_post,
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::delete_post,
        handlers::media_upload::upload_media,
        handlers::integrations::list_integrations,
        handlers::integrations::is_connected,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::integrations::ConnectedResponse,
        models::CreatePostRequest,
        models::CreatedPostResponse,
        models::Post,
        models::PostType,
        models::PostState,
        models::Tag,
        models::IntegrationRef,
        models::ContentBlockRequest,
        models::MediaReference,
        models::TargetRequest,
        models::IntegrationResponse,
        models::IntegrationCustomer,
    )),
    tags(
        (name = "posts", description = "Post ingestion and retrieval"),
        (name = "media", description = "Media uploads"),
        (name = "integrations", description = "Connected integrations")
    )
)]
pub struct ApiDoc;
