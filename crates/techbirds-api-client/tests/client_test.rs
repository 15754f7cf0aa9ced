//! HTTP-level tests for the media service client against a mock backend.

use std::sync::Arc;

use mockito::{Matcher, Server};
use serde_json::json;
use techbirds_api_client::{
    ApiClient, ApiError, Auth, FileUpload, MediaService, StaticSession, UploadRequest,
};
use techbirds_core::{
    ClientConfig, FailureKind, MediaId, MediaMetadataUpdate, QueryFilter, SortBy, SortOrder,
    UpdateMethod,
};

fn client_for(server: &Server) -> ApiClient {
    client_with(server, UpdateMethod::Patch)
}

fn client_with(server: &Server, update_method: UpdateMethod) -> ApiClient {
    let config = ClientConfig {
        api_url: server.url(),
        update_method,
        ..ClientConfig::default()
    };
    ApiClient::new(
        config,
        Arc::new(StaticSession::new(Auth::Bearer("test-token".to_string()))),
    )
    .unwrap()
}

fn item_json(id: u64, mime: &str) -> serde_json::Value {
    json!({
        "id": id,
        "url": format!("/uploads/{}", id),
        "mimeType": mime,
        "title": format!("item {}", id),
        "createdAt": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn list_serializes_filter_and_sends_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/media")
        .match_header("authorization", "Bearer test-token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "24".into()),
            Matcher::UrlEncoded("search".into(), "cat".into()),
            Matcher::UrlEncoded("mimeType".into(), "image/".into()),
            Matcher::UrlEncoded("sortBy".into(), "title".into()),
            Matcher::UrlEncoded("sortOrder".into(), "asc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "items": [item_json(1, "image/png"), item_json(2, "image/jpeg")],
                "pagination": {"page": 2, "limit": 24, "total": 26, "totalPages": 2}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let filter = QueryFilter {
        page: 2,
        search: "cat".to_string(),
        mime_type: "image/".to_string(),
        sort_by: SortBy::Title,
        sort_order: SortOrder::Asc,
        ..QueryFilter::default()
    };
    let page = client.list(&filter).await.unwrap().normalize(&filter);

    mock.assert_async().await;
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].mime_type, "image/png");
    assert_eq!(page.pagination.total, 26);
    assert_eq!(page.pagination.total_pages, 2);
}

#[tokio::test]
async fn list_error_preserves_status_and_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/media")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Token expired"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .list_media(&QueryFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.server_message(), Some("Token expired"));
    assert_eq!(err.kind(), FailureKind::Unauthorized);
}

#[tokio::test]
async fn upload_sends_one_file_and_all_metadata_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/media")
        .match_header("content-type", Matcher::Regex("multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="cat.png""#.into()),
            Matcher::Regex(r#"name="title""#.into()),
            Matcher::Regex(r#"name="altText""#.into()),
            Matcher::Regex(r#"name="caption""#.into()),
            Matcher::Regex(r#"name="description""#.into()),
            Matcher::Regex("A sleepy cat".into()),
        ]))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": item_json(99, "image/png") }).to_string())
        .create_async()
        .await;

    let request = UploadRequest::new(
        FileUpload::new("cat.png", b"not really a png".to_vec()),
        MediaMetadataUpdate {
            title: "Cat".to_string(),
            alt_text: "A sleepy cat".to_string(),
            ..Default::default()
        },
    );
    let item = client_for(&server).upload(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(item.id, MediaId::from("99"));
}

#[tokio::test]
async fn upload_too_large_keeps_raw_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/media")
        .with_status(413)
        .with_body(r#"{"message":"File exceeds the 10MB limit"}"#)
        .create_async()
        .await;

    let request = UploadRequest::new(
        FileUpload::new("huge.mp4", vec![0; 16]),
        MediaMetadataUpdate::default(),
    );
    let err = client_for(&server).upload(request).await.unwrap_err();
    match &err {
        ApiError::Status {
            status,
            message,
            body,
        } => {
            assert_eq!(*status, 413);
            assert_eq!(message.as_deref(), Some("File exceeds the 10MB limit"));
            assert!(body.contains("10MB"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(err.kind(), FailureKind::PayloadTooLarge);
}

#[tokio::test]
async fn update_sends_full_form_with_configured_method() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/media/42")
        .match_body(Matcher::Json(json!({
            "title": "New title",
            "altText": "alt",
            "caption": "",
            "description": "desc"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(item_json(42, "image/png").to_string())
        .create_async()
        .await;

    let update = MediaMetadataUpdate {
        title: "New title".to_string(),
        alt_text: "alt".to_string(),
        caption: String::new(),
        description: "desc".to_string(),
    };
    let item = client_with(&server, UpdateMethod::Put)
        .update_metadata(&MediaId::from("42"), &update)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(item.id, MediaId::from("42"));
}

#[tokio::test]
async fn soft_and_hard_delete_hit_distinct_endpoints() {
    let mut server = Server::new_async().await;
    let soft = server
        .mock("DELETE", "/api/media/7")
        .with_status(204)
        .create_async()
        .await;
    let hard = server
        .mock("DELETE", "/api/media/7/permanent")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let client = client_for(&server);
    let id = MediaId::from("7");
    client.soft_delete(&id).await.unwrap();
    client.hard_delete(&id).await.unwrap();

    soft.assert_async().await;
    hard.assert_async().await;
}

#[tokio::test]
async fn get_missing_item_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/media/404")
        .with_status(404)
        .with_body(r#"{"error":"Media not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .get_media(&MediaId::from("404"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
    assert_eq!(err.server_message(), Some("Media not found"));
}

#[tokio::test]
async fn anonymous_session_sends_no_auth_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/media")
        .match_query(Matcher::Any)
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let config = ClientConfig {
        api_url: server.url(),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(config, Arc::new(StaticSession::anonymous())).unwrap();
    let response = client.list_media(&QueryFilter::default()).await.unwrap();

    mock.assert_async().await;
    assert!(response.normalize(&QueryFilter::default()).items.is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    let config = ClientConfig {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        api_url: "http://127.0.0.1:9".to_string(),
        http_timeout_secs: 2,
        ..ClientConfig::default()
    };
    let client = ApiClient::new(config, Arc::new(StaticSession::anonymous())).unwrap();
    let err = client.list_media(&QueryFilter::default()).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Network);
}
