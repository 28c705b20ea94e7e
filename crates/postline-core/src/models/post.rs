use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::media::MediaReference;
use crate::settings::ProviderSettings;

/// How a submission should be materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// Saved without a schedule; targets may be absent.
    Draft,
    /// Queued for the given `date`.
    Schedule,
    /// Published as soon as possible; `date` still required.
    Now,
}

impl PostType {
    pub fn is_draft(&self) -> bool {
        matches!(self, PostType::Draft)
    }
}

/// Lifecycle state of a stored post row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "post_state", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum PostState {
    Draft,
    Queue,
    Published,
    Error,
}

impl PostType {
    /// Initial stored state for a submission of this type.
    pub fn initial_state(&self) -> PostState {
        match self {
            PostType::Draft => PostState::Draft,
            PostType::Schedule | PostType::Now => PostState::Queue,
        }
    }
}

/// One label attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub value: String,
    pub label: String,
}

// ----- Raw request DTOs (pre-validation wire shape) -----

/// Reference to an integration owned by the calling organization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IntegrationRef {
    pub id: String,
}

/// One unit of content within a target, as submitted by the client.
///
/// `image` carries already-stored media references; `imageUrls` carries raw
/// external URLs that the media resolver turns into references. A block may
/// carry at most one of the two.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentBlockRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<MediaReference>>,
    #[serde(
        rename = "imageUrls",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_urls: Option<Vec<String>>,
}

/// One integration binding within a submission, as submitted by the client.
///
/// `settings` stays a raw JSON value here; the provider settings resolver
/// turns it into a [`ProviderSettings`] variant during shape validation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TargetRequest {
    pub integration: IntegrationRef,
    pub value: Vec<ContentBlockRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub settings: JsonValue,
}

/// Root entity for one ingestion request, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[serde(rename = "type")]
    pub post_type: PostType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(rename = "shortLink", default)]
    pub short_link: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub posts: Vec<TargetRequest>,
}

// ----- Validated / normalized structures -----

/// Media attached to a content block: either stored references or, before
/// resolution, raw external URLs. The media resolver guarantees that a block
/// never leaves the pipeline in the `RawUrls` state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockMedia {
    References { image: Vec<MediaReference> },
    RawUrls {
        #[serde(rename = "imageUrls")]
        urls: Vec<String>,
    },
}

/// One validated unit of content plus its media.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub media: Option<BlockMedia>,
}

impl ContentBlock {
    /// True while the block still carries unresolved external URLs.
    pub fn has_raw_urls(&self) -> bool {
        matches!(self.media, Some(BlockMedia::RawUrls { .. }))
    }
}

/// One validated integration binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostTarget {
    pub integration_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub content_blocks: Vec<ContentBlock>,
    pub settings: ProviderSettings,
}

/// A validated submission, immutable after validation passes.
///
/// Never persisted in this form; the post store materializes it into one
/// stored row per target, correlated by a shared group id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSubmission {
    pub post_type: PostType,
    pub order: Option<String>,
    pub short_link: bool,
    pub inter: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub tags: Vec<Tag>,
    pub targets: Vec<PostTarget>,
}

impl PostSubmission {
    /// True if any content block anywhere still carries raw image URLs.
    pub fn has_raw_urls(&self) -> bool {
        self.targets
            .iter()
            .flat_map(|t| t.content_blocks.iter())
            .any(ContentBlock::has_raw_urls)
    }

    /// Re-serialize into the wire shape, e.g. for diagnostics or re-validation.
    pub fn to_request(&self) -> CreatePostRequest {
        CreatePostRequest {
            post_type: self.post_type,
            order: self.order.clone(),
            short_link: self.short_link,
            inter: self.inter,
            date: self.date,
            tags: self.tags.clone(),
            posts: self
                .targets
                .iter()
                .map(|t| TargetRequest {
                    integration: IntegrationRef {
                        id: t.integration_id.clone(),
                    },
                    group: t.group.clone(),
                    value: t
                        .content_blocks
                        .iter()
                        .map(|b| {
                            let (image, image_urls) = match &b.media {
                                Some(BlockMedia::References { image }) => {
                                    (Some(image.clone()), None)
                                }
                                Some(BlockMedia::RawUrls { urls }) => (None, Some(urls.clone())),
                                None => (None, None),
                            };
                            ContentBlockRequest {
                                content: b.content.clone(),
                                id: b.id.clone(),
                                image,
                                image_urls,
                            }
                        })
                        .collect(),
                    settings: serde_json::to_value(&t.settings)
                        .unwrap_or(JsonValue::Object(Default::default())),
                })
                .collect(),
        }
    }
}

// ----- Stored post rows and responses -----

/// Database row for the posts table: one row per target, grouped.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Post {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub group_id: Uuid,
    pub integration_id: Option<String>,
    pub state: PostState,
    pub publish_date: Option<DateTime<Utc>>,
    /// Serialized content blocks (post-resolution wire shape).
    pub content: JsonValue,
    /// Serialized provider settings, `__type`-tagged.
    pub settings: JsonValue,
    pub tags: JsonValue,
    pub short_link: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The created post record returned by the ingestion entry point.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedPostResponse {
    pub group_id: Uuid,
    pub state: PostState,
    pub posts: Vec<Post>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_type_wire_names() {
        assert_eq!(serde_json::to_string(&PostType::Draft).unwrap(), "\"draft\"");
        assert_eq!(
            serde_json::to_string(&PostType::Schedule).unwrap(),
            "\"schedule\""
        );
        assert_eq!(serde_json::to_string(&PostType::Now).unwrap(), "\"now\"");
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(PostType::Draft.initial_state(), PostState::Draft);
        assert_eq!(PostType::Schedule.initial_state(), PostState::Queue);
        assert_eq!(PostType::Now.initial_state(), PostState::Queue);
    }

    #[test]
    fn test_block_media_serializes_to_wire_field_names() {
        let block = ContentBlock {
            content: "hello".to_string(),
            id: None,
            media: Some(BlockMedia::RawUrls {
                urls: vec!["https://x/img.png".to_string()],
            }),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert!(json.get("imageUrls").is_some());
        assert!(json.get("image").is_none());

        let block = ContentBlock {
            content: "hello".to_string(),
            id: None,
            media: Some(BlockMedia::References {
                image: vec![MediaReference {
                    id: Uuid::new_v4(),
                    path: "media/a.png".to_string(),
                    alt: String::new(),
                    thumbnail: None,
                }],
            }),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert!(json.get("image").is_some());
        assert!(json.get("imageUrls").is_none());
    }
}
