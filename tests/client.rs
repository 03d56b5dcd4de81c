//! End-to-end tests of the client against a mock API server.
//!
//! These exercise the full path: configuration resolution, request
//! construction, the background transport worker, response decoding, and
//! cancellation.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use youtube_client::{
    AccountProvider, Client, CredentialSource, Error, ProviderError, Rating, ServiceStatus,
};

struct StaticAccounts {
    statuses: Vec<ServiceStatus>,
}

impl AccountProvider for StaticAccounts {
    fn refresh(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn service_statuses(&self) -> Result<Vec<ServiceStatus>, ProviderError> {
        Ok(self.statuses.clone())
    }
}

struct FailingAccounts;

impl AccountProvider for FailingAccounts {
    fn refresh(&self) -> Result<(), ProviderError> {
        Err("account service offline".into())
    }

    fn service_statuses(&self) -> Result<Vec<ServiceStatus>, ProviderError> {
        Err("account service offline".into())
    }
}

fn client_for(server: &MockServer) -> Client {
    Client::builder("XYZ").api_root(server.uri()).build().unwrap()
}

fn authenticated_client_for(server: &MockServer) -> Client {
    Client::builder("XYZ")
        .api_root(server.uri())
        .credentials(CredentialSource::Refresh(Box::new(StaticAccounts {
            statuses: vec![ServiceStatus {
                service_authenticated: true,
                access_token: "tok-123".to_owned(),
                client_id: "client-1".to_owned(),
                client_secret: "hunter2".to_owned(),
            }],
        })))
        .build()
        .unwrap()
}

#[tokio::test]
async fn guide_categories_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/guideCategories"))
        .and(query_param("part", "snippet"))
        .and(query_param("regionCode", "US"))
        .and(query_param("hl", "en"))
        .and(query_param("key", "XYZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#guideCategoryListResponse",
            "items": [{
                "kind": "youtube#guideCategory",
                "id": "GCbXVzaWM",
                "snippet": {"title": "Music"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let categories = client.guide_categories("US", "en").await.unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].snippet.title, "Music");
}

#[tokio::test]
async fn unauthenticated_requests_carry_no_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .and(query_param("key", "XYZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.video_details("v1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn authenticated_requests_use_bearer_and_no_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/subscriptions"))
        .and(query_param("mine", "true"))
        .and(header("authorization", "Bearer tok-123"))
        .and(query_param_is_missing("key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "kind": "youtube#subscription",
                "id": "sub-1",
                "snippet": {"title": "some channel"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client_for(&server);
    assert!(client.authenticated().unwrap());

    let subscriptions = client.my_subscriptions().await.unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0].id, "sub-1");
}

#[tokio::test]
async fn search_omits_unset_optional_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("q", "ferris"))
        .and(query_param("type", "video"))
        .and(query_param_is_missing("videoCategoryId"))
        .and(query_param_is_missing("maxResults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.search("ferris", None, None).await.unwrap();
}

#[tokio::test]
async fn search_results_filter_to_videos_by_nested_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "kind": "youtube#searchResult",
                    "id": {"kind": "youtube#video", "videoId": "v1"},
                    "snippet": {"title": "a video"}
                },
                {
                    "kind": "youtube#searchResult",
                    "id": {"kind": "youtube#channel", "channelId": "c1"},
                    "snippet": {"title": "a channel"}
                },
                {
                    "kind": "youtube#searchResult",
                    "id": {"kind": "youtube#video", "videoId": "v2"},
                    "snippet": {"title": "another video"}
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let videos = client.search("anything", Some(10), Some("20")).await.unwrap();

    let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["v1", "v2"]);
}

#[tokio::test]
async fn get_failure_carries_the_api_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "video not found"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.video_details("nope").await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "video not found");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_string_error_field_becomes_an_empty_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "backend exploded"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.video_details("v1").await {
        Err(Error::Api { message, .. }) => assert_eq!(message, ""),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn post_comment_sends_the_nested_snippet_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/youtube/v3/commentThreads"))
        .and(query_param("part", "snippet"))
        .and(body_json(json!({
            "snippet": {
                "topLevelComment": {
                    "snippet": {
                        "textOriginal": "hello",
                        "videoId": "vid1"
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.post_comment("vid1", "hello").await.unwrap());
}

#[tokio::test]
async fn rate_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/youtube/v3/videos/rate"))
        .and(query_param("id", "v1"))
        .and(query_param("rating", "like"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.rate("v1", Rating::Like).await.unwrap());
}

#[tokio::test]
async fn write_success_without_identifiers_reports_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/youtube/v3/commentThreads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(!client.post_comment("vid1", "hello").await.unwrap());
}

#[tokio::test]
async fn write_rejection_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/youtube/v3/subscriptions"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.subscribe("c1").await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(message, "forbidden");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unsubscribe_posts_with_the_delete_override() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/youtube/v3/subscriptions"))
        .and(query_param("id", "sub-1"))
        .and(header("x-http-method-override", "DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.unsubscribe("sub-1").await.unwrap());
}

#[tokio::test]
async fn add_to_playlist_references_both_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/youtube/v3/playlistItems"))
        .and(body_json(json!({
            "snippet": {
                "playlistId": "pl1",
                "resourceId": {
                    "kind": "youtube#video",
                    "videoId": "v1"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "pli-1"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.add_to_playlist("v1", "pl1").await.unwrap());
}

#[tokio::test]
async fn uploads_playlist_resolves_the_related_playlist_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("id", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "kind": "youtube#channel",
                "id": "c1",
                "snippet": {"title": "channel"},
                "contentDetails": {"relatedPlaylists": {"uploads": "UUc1"}}
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.uploads_playlist("c1").await.unwrap(), "UUc1");
}

#[tokio::test]
async fn uploads_playlist_is_empty_when_the_channel_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.uploads_playlist("c1").await.unwrap(), "");
}

#[tokio::test]
async fn corrupt_gzip_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_raw(b"this is not gzip".to_vec(), "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.video_details("v1").await {
        Err(Error::Transport(_)) => {}
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_parses_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("definitely not json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.video_details("v1").await.unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_fails_resolution_and_operations() {
    let server = MockServer::start().await;
    let client = Client::builder("XYZ")
        .api_root(server.uri())
        .credentials(CredentialSource::Refresh(Box::new(FailingAccounts)))
        .build()
        .unwrap();

    assert!(matches!(client.authenticated(), Err(Error::Accounts(_))));
    assert!(matches!(
        client.search("ferris", None, None).await,
        Err(Error::Accounts(_))
    ));
}

#[tokio::test]
async fn cancel_settles_every_in_flight_operation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": []}))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.video_details("v1");
    let second = client.my_subscriptions();
    let third = client.guide_categories("US", "en");

    // Let the requests reach the mock before cancelling.
    tokio::time::sleep(Duration::from_millis(100)).await;
    client.cancel();
    assert!(client.is_cancelled());

    let first = tokio::time::timeout(Duration::from_secs(5), first)
        .await
        .expect("cancelled operations must not hang");
    assert!(matches!(first, Err(Error::Cancelled)));

    let second = tokio::time::timeout(Duration::from_secs(5), second)
        .await
        .expect("cancelled operations must not hang");
    assert!(matches!(second, Err(Error::Cancelled)));

    let third = tokio::time::timeout(Duration::from_secs(5), third)
        .await
        .expect("cancelled operations must not hang");
    assert!(matches!(third, Err(Error::Cancelled)));
}

#[tokio::test]
async fn operations_after_cancel_fail_immediately() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client.cancel();

    let settled = tokio::time::timeout(Duration::from_secs(5), client.video_details("v1"))
        .await
        .expect("post-cancel operations must not hang");
    assert!(matches!(settled, Err(Error::Cancelled)));
}

#[tokio::test]
async fn dropping_the_client_settles_in_flight_operations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": []}))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pending = client.video_details("v1");
    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(client);

    let settled = tokio::time::timeout(Duration::from_secs(5), pending)
        .await
        .expect("orphaned operations must not hang");
    assert!(matches!(settled, Err(Error::Cancelled)));
}

#[test]
fn wait_serves_synchronous_callers() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "kind": "youtube#video",
                    "id": "v1",
                    "snippet": {"title": "blocking"}
                }]
            })))
            .mount(&server)
            .await;
        server
    });

    let client = client_for(&server);
    let videos = client.video_details("v1").wait().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].snippet.title, "blocking");
}
