//! End-to-end pipeline tests over in-memory collaborators.
//!
//! These exercise the ingestion orchestration (validation, integration
//! checks, media resolution, persistence) without a database or network.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use postline_api::services::{
    FetchedMedia, IngestService, IntegrationDirectory, MediaResolver, MediaStore, PostStore,
    UrlFetcher,
};
use postline_core::models::{
    BlockMedia, ContentBlockRequest, CreatePostRequest, CreatedPostResponse, Integration,
    IntegrationRef, MediaReference, Post, PostState, PostSubmission, PostType, TargetRequest,
};
use postline_core::{AppError, ErrorMetadata};

// ----- In-memory collaborators -----

struct StubDirectory {
    integrations: Vec<Integration>,
}

impl StubDirectory {
    fn with(ids: &[&str], org: Uuid) -> Self {
        Self {
            integrations: ids.iter().map(|id| integration(id, org, false)).collect(),
        }
    }
}

#[async_trait]
impl IntegrationDirectory for StubDirectory {
    async fn get(
        &self,
        organization_id: Uuid,
        integration_id: &str,
    ) -> Result<Option<Integration>, AppError> {
        Ok(self
            .integrations
            .iter()
            .find(|i| i.id == integration_id && i.organization_id == organization_id)
            .cloned())
    }
}

#[derive(Default)]
struct StubFetcher {
    fail_urls: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl UrlFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedMedia, AppError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail_urls.contains(url) {
            return Err(AppError::BadRequest("URL returned status code: 404".to_string()));
        }
        Ok(FetchedMedia {
            bytes: Bytes::from_static(b"\x89PNG"),
            content_type: "image/png".to_string(),
        })
    }
}

#[derive(Default)]
struct StubMediaStore {
    stored: Mutex<Vec<String>>,
}

#[async_trait]
impl MediaStore for StubMediaStore {
    async fn store(
        &self,
        organization_id: Uuid,
        display_name: &str,
        _content_type: &str,
        _data: Bytes,
    ) -> Result<MediaReference, AppError> {
        self.stored.lock().unwrap().push(display_name.to_string());
        Ok(MediaReference {
            id: Uuid::new_v4(),
            path: format!("media/{}/{}", organization_id, display_name),
            alt: String::new(),
            thumbnail: None,
        })
    }
}

#[derive(Default)]
struct StubPostStore {
    calls: AtomicUsize,
    last: Mutex<Option<PostSubmission>>,
    rows: Mutex<Vec<Post>>,
    deleted_groups: Mutex<Vec<Uuid>>,
}

#[async_trait]
impl PostStore for StubPostStore {
    async fn create_posts(
        &self,
        _organization_id: Uuid,
        submission: &PostSubmission,
    ) -> Result<CreatedPostResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(submission.clone());
        Ok(CreatedPostResponse {
            group_id: Uuid::new_v4(),
            state: submission.post_type.initial_state(),
            posts: vec![],
        })
    }

    async fn find_post(
        &self,
        organization_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Post>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == post_id && p.organization_id == organization_id)
            .cloned())
    }

    async fn delete_group(
        &self,
        organization_id: Uuid,
        group_id: Uuid,
    ) -> Result<u64, AppError> {
        self.deleted_groups.lock().unwrap().push(group_id);
        let count = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.group_id == group_id && p.organization_id == organization_id)
            .count();
        Ok(count as u64)
    }
}

// ----- Fixtures -----

fn integration(id: &str, org: Uuid, disabled: bool) -> Integration {
    Integration {
        id: id.to_string(),
        organization_id: org,
        name: format!("{} account", id),
        provider_identifier: "x".to_string(),
        picture: None,
        disabled,
        profile: None,
        customer_id: None,
        customer_name: None,
    }
}

fn post_row(org: Uuid, group: Uuid) -> Post {
    Post {
        id: Uuid::new_v4(),
        organization_id: org,
        group_id: group,
        integration_id: Some("acc-1".to_string()),
        state: PostState::Queue,
        publish_date: Some(Utc::now() + Duration::hours(1)),
        content: json!([]),
        settings: json!({"__type": "generic"}),
        tags: json!([]),
        short_link: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn block(content: &str) -> ContentBlockRequest {
    ContentBlockRequest {
        content: content.to_string(),
        id: None,
        image: None,
        image_urls: None,
    }
}

fn target(id: &str, blocks: Vec<ContentBlockRequest>) -> TargetRequest {
    TargetRequest {
        integration: IntegrationRef { id: id.to_string() },
        value: blocks,
        group: None,
        settings: json!({"__type": "generic"}),
    }
}

fn request(posts: Vec<TargetRequest>) -> CreatePostRequest {
    CreatePostRequest {
        post_type: PostType::Schedule,
        order: None,
        short_link: false,
        inter: None,
        date: Some(Utc::now() + Duration::hours(1)),
        tags: vec![],
        posts,
    }
}

struct Harness {
    service: IngestService,
    fetcher: Arc<StubFetcher>,
    media: Arc<StubMediaStore>,
    posts: Arc<StubPostStore>,
}

fn harness(org: Uuid, integration_ids: &[&str], fail_urls: &[&str]) -> Harness {
    let fetcher = Arc::new(StubFetcher {
        fail_urls: fail_urls.iter().map(|s| s.to_string()).collect(),
        calls: Mutex::new(vec![]),
    });
    let media = Arc::new(StubMediaStore::default());
    let posts = Arc::new(StubPostStore::default());

    let service = IngestService::new(
        Arc::new(StubDirectory::with(integration_ids, org)),
        Arc::new(MediaResolver::new(fetcher.clone(), media.clone())),
        posts.clone(),
    );

    Harness {
        service,
        fetcher,
        media,
        posts,
    }
}

// ----- Scenarios -----

#[tokio::test]
async fn stored_references_pass_through_without_fetching() {
    let org = Uuid::new_v4();
    let h = harness(org, &["acc-1"], &[]);

    let mut b = block("hello");
    b.image = Some(vec![MediaReference {
        id: Uuid::new_v4(),
        path: "media/existing.png".to_string(),
        alt: String::new(),
        thumbnail: None,
    }]);
    let req = request(vec![target("acc-1", vec![b])]);

    let response = h.service.ingest(org, &req).await.unwrap();
    assert_eq!(response.state, PostState::Queue);

    assert!(h.fetcher.calls.lock().unwrap().is_empty());
    assert_eq!(h.posts.calls.load(Ordering::SeqCst), 1);

    let stored = h.posts.last.lock().unwrap().clone().unwrap();
    assert!(matches!(
        stored.targets[0].content_blocks[0].media,
        Some(BlockMedia::References { .. })
    ));
}

#[tokio::test]
async fn raw_urls_are_resolved_in_order_before_storing() {
    let org = Uuid::new_v4();
    let h = harness(org, &["acc-1"], &[]);

    let mut b = block("hello");
    b.image_urls = Some(vec![
        "https://example.com/a.png".to_string(),
        "https://example.com/b.png".to_string(),
    ]);
    let req = request(vec![target("acc-1", vec![b])]);

    h.service.ingest(org, &req).await.unwrap();

    assert_eq!(
        *h.fetcher.calls.lock().unwrap(),
        vec![
            "https://example.com/a.png".to_string(),
            "https://example.com/b.png".to_string()
        ]
    );
    assert_eq!(*h.media.stored.lock().unwrap(), vec!["a.png", "b.png"]);

    let stored = h.posts.last.lock().unwrap().clone().unwrap();
    match &stored.targets[0].content_blocks[0].media {
        Some(BlockMedia::References { image }) => {
            assert_eq!(image.len(), 2);
            assert!(image[0].path.ends_with("a.png"));
        }
        other => panic!("expected resolved references, got {:?}", other),
    }
    assert!(!stored.has_raw_urls());
}

#[tokio::test]
async fn invalid_submission_triggers_no_side_effects() {
    let org = Uuid::new_v4();
    let h = harness(org, &["acc-1"], &[]);

    // Unknown provider tag, plus a raw URL that must never be fetched.
    let mut b = block("hello");
    b.image_urls = Some(vec!["https://example.com/a.png".to_string()]);
    let mut t = target("acc-1", vec![b]);
    t.settings = json!({"__type": "friendster"});
    let req = request(vec![t]);

    let err = h.service.ingest(org, &req).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    assert!(h.fetcher.calls.lock().unwrap().is_empty());
    assert!(h.media.stored.lock().unwrap().is_empty());
    assert_eq!(h.posts.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn partial_media_failure_keeps_earlier_media_and_stores_nothing() {
    let org = Uuid::new_v4();
    let h = harness(org, &["acc-1"], &["https://example.com/broken.png"]);

    let mut b = block("hello");
    b.image_urls = Some(vec![
        "https://example.com/ok.png".to_string(),
        "https://example.com/broken.png".to_string(),
        "https://example.com/never.png".to_string(),
    ]);
    let req = request(vec![target("acc-1", vec![b])]);

    let err = h.service.ingest(org, &req).await.unwrap_err();
    match &err {
        AppError::MediaResolution { url, .. } => {
            assert_eq!(url, "https://example.com/broken.png");
        }
        other => panic!("expected media resolution error, got {:?}", other),
    }
    assert_eq!(
        err.client_message(),
        "Failed to upload image from URL: https://example.com/broken.png"
    );

    // The first image stays stored; the third is never fetched; no post rows.
    assert_eq!(*h.media.stored.lock().unwrap(), vec!["ok.png"]);
    assert_eq!(
        *h.fetcher.calls.lock().unwrap(),
        vec![
            "https://example.com/ok.png".to_string(),
            "https://example.com/broken.png".to_string()
        ]
    );
    assert_eq!(h.posts.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_integration_is_not_found() {
    let org = Uuid::new_v4();
    let h = harness(org, &["acc-1"], &[]);

    let req = request(vec![target("acc-2", vec![block("hello")])]);
    let err = h.service.ingest(org, &req).await.unwrap_err();
    assert_eq!(err.http_status_code(), 404);
    assert_eq!(h.posts.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn other_organizations_integration_is_not_found() {
    let org = Uuid::new_v4();
    let other_org = Uuid::new_v4();
    let h = harness(other_org, &["acc-1"], &[]);

    let req = request(vec![target("acc-1", vec![block("hello")])]);
    let err = h.service.ingest(org, &req).await.unwrap_err();
    assert_eq!(err.http_status_code(), 404);
}

#[tokio::test]
async fn disabled_integration_is_rejected() {
    let org = Uuid::new_v4();
    let fetcher = Arc::new(StubFetcher::default());
    let media = Arc::new(StubMediaStore::default());
    let posts = Arc::new(StubPostStore::default());
    let service = IngestService::new(
        Arc::new(StubDirectory {
            integrations: vec![integration("acc-1", org, true)],
        }),
        Arc::new(MediaResolver::new(fetcher, media)),
        posts.clone(),
    );

    let req = request(vec![target("acc-1", vec![block("hello")])]);
    let err = service.ingest(org, &req).await.unwrap_err();
    assert_eq!(err.http_status_code(), 400);
    assert_eq!(posts.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn deleting_a_post_removes_its_whole_group() {
    let org = Uuid::new_v4();
    let store = StubPostStore::default();

    let group = Uuid::new_v4();
    let first = post_row(org, group);
    let second = post_row(org, group);
    let post_id = first.id;
    store.rows.lock().unwrap().extend([first, second]);

    // A client holding any post id from the group can delete the group.
    assert!(store.delete_post(org, post_id).await.unwrap());
    assert_eq!(*store.deleted_groups.lock().unwrap(), vec![group]);
}

#[tokio::test]
async fn deleting_unknown_or_foreign_post_touches_no_group() {
    let org = Uuid::new_v4();
    let store = StubPostStore::default();

    let row = post_row(org, Uuid::new_v4());
    let post_id = row.id;
    store.rows.lock().unwrap().push(row);

    assert!(!store.delete_post(org, Uuid::new_v4()).await.unwrap());
    assert!(!store.delete_post(Uuid::new_v4(), post_id).await.unwrap());
    assert!(store.deleted_groups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn draft_without_targets_is_stored_once() {
    let org = Uuid::new_v4();
    let h = harness(org, &[], &[]);

    let req = CreatePostRequest {
        post_type: PostType::Draft,
        order: None,
        short_link: false,
        inter: None,
        date: None,
        tags: vec![],
        posts: vec![],
    };

    let response = h.service.ingest(org, &req).await.unwrap();
    assert_eq!(response.state, PostState::Draft);
    assert_eq!(h.posts.calls.load(Ordering::SeqCst), 1);
}
