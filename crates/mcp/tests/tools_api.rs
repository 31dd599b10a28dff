// End-to-end tool calls against a mocked publishing API

use play_console_mcp::protocol::CallToolResult;
use play_console_mcp::tools::{DispatchError, ToolRegistry};
use play_console_mcp::{default_registry, PublisherSettings};
use play_publisher::CredentialSource;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PKG: &str = "com.example.app";
const EDIT: &str = "edit-42";

fn registry_for(server: &MockServer) -> ToolRegistry {
    let settings = PublisherSettings::new(Some(CredentialSource::AccessToken(
        "test-token".to_string(),
    )))
    .with_base_url(server.uri());
    default_registry(settings).unwrap()
}

fn json_of(result: &CallToolResult) -> serde_json::Value {
    assert!(
        result.is_error.is_none(),
        "unexpected error result: {}",
        result.text_content()
    );
    serde_json::from_str(&result.text_content()).unwrap()
}

async fn mount_edit_lifecycle(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/applications/{}/edits", PKG)))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": EDIT,
            "expiryTimeSeconds": "1700003600"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/applications/{}/edits/{}", PKG, EDIT)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;
}

fn edit_path(rest: &str) -> String {
    format!("/applications/{}/edits/{}/{}", PKG, EDIT, rest)
}

#[tokio::test]
async fn test_app_details_projects_listings() {
    let server = MockServer::start().await;
    mount_edit_lifecycle(&server).await;

    Mock::given(method("GET"))
        .and(path(edit_path("details")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "defaultLanguage": "en-US",
            "contactEmail": "dev@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(edit_path("listings")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "androidpublisher#listingsListResponse",
            "listings": [
                {
                    "language": "en-US",
                    "title": "Example",
                    "shortDescription": "An example app",
                    "fullDescription": "d".repeat(500)
                },
                {
                    "language": "fr-FR",
                    "title": "Exemple",
                    "fullDescription": "Une petite application."
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("get-app-details", serde_json::json!({"packageName": PKG}))
        .await
        .unwrap();
    let value = json_of(&result);

    assert_eq!(value["details"]["defaultLanguage"], "en-US");
    assert_eq!(value["details"]["contactEmail"], "dev@example.com");
    assert_eq!(value["listings"][0]["fullDescription"], format!("{}...", "d".repeat(200)));
    assert_eq!(value["listings"][1]["fullDescription"], "Une petite application.");
}

#[tokio::test]
async fn test_release_tracks_single_production_track() {
    let server = MockServer::start().await;
    mount_edit_lifecycle(&server).await;

    Mock::given(method("GET"))
        .and(path(edit_path("tracks/production")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "track": "production",
            "releases": [{
                "name": "3.1.0",
                "status": "completed",
                "versionCodes": ["310"],
                "releaseNotes": [{"language": "en-US", "text": "r".repeat(130)}],
                "inAppUpdatePriority": 2
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The list endpoint must not be used when a track is named
    Mock::given(method("GET"))
        .and(path(edit_path("tracks")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call(
            "get-release-tracks",
            serde_json::json!({"packageName": PKG, "track": "production"}),
        )
        .await
        .unwrap();
    let value = json_of(&result);

    let tracks = value.as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["track"], "production");

    let release = &tracks[0]["releases"][0];
    assert_eq!(release["status"], "completed");
    assert_eq!(release["versionCodes"], serde_json::json!(["310"]));
    assert_eq!(release["inAppUpdatePriority"], 2);
    assert_eq!(release["releaseNotes"][0]["text"], format!("{}...", "r".repeat(100)));
}

#[tokio::test]
async fn test_release_tracks_all_tracks() {
    let server = MockServer::start().await;
    mount_edit_lifecycle(&server).await;

    Mock::given(method("GET"))
        .and(path(edit_path("tracks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tracks": [
                {"track": "internal", "releases": [{"status": "draft", "versionCodes": ["311"]}]},
                {"track": "production", "releases": []}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("get-release-tracks", serde_json::json!({"packageName": PKG}))
        .await
        .unwrap();
    let value = json_of(&result);

    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["releases"][0]["versionCodes"][0], "311");
}

#[tokio::test]
async fn test_bundle_details_reads_both_listings() {
    let server = MockServer::start().await;
    mount_edit_lifecycle(&server).await;

    Mock::given(method("GET"))
        .and(path(edit_path("bundles")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "bundles": [{"versionCode": 310, "sha1": "aa", "sha256": "bb"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(edit_path("apks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "apks": [{"versionCode": 120, "binary": {"sha1": "cc", "sha256": "dd"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("get-bundle-details", serde_json::json!({"packageName": PKG}))
        .await
        .unwrap();
    let value = json_of(&result);

    assert_eq!(
        value,
        serde_json::json!({
            "bundles": [{"versionCode": 310, "sha256": "bb"}],
            "apks": [{"versionCode": 120, "binary": {"sha256": "dd"}}]
        })
    );
}

#[tokio::test]
async fn test_bundle_details_failure_still_deletes_edit() {
    let server = MockServer::start().await;
    mount_edit_lifecycle(&server).await;

    Mock::given(method("GET"))
        .and(path(edit_path("bundles")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"bundles": []})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(edit_path("apks")))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("get-bundle-details", serde_json::json!({"packageName": PKG}))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        result.text_content(),
        "Error: API error (status 429): Quota exceeded"
    );
}

#[tokio::test]
async fn test_reviews_default_page_size_and_reply_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/applications/{}/reviews", PKG)))
        .and(query_param("maxResults", "20"))
        .and(query_param("translationLanguage", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "reviews": [
                {
                    "reviewId": "r1",
                    "authorName": "Ada",
                    "comments": [
                        {"userComment": {
                            "text": "Works great",
                            "starRating": 5,
                            "lastModified": {"seconds": "1700000000", "nanos": 0}
                        }},
                        {"developerComment": {
                            "text": "Thank you!",
                            "lastModified": {"seconds": "1700000600"}
                        }}
                    ]
                },
                {
                    "reviewId": "r2",
                    "authorName": "Linus",
                    "comments": [{"userComment": {"text": "Too slow", "starRating": 2}}]
                }
            ],
            "tokenPagination": {"nextPageToken": "page-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call(
            "get-reviews",
            serde_json::json!({"packageName": PKG, "translationLanguage": "en"}),
        )
        .await
        .unwrap();
    let value = json_of(&result);

    assert_eq!(value["totalReviews"], 2);
    assert_eq!(value["nextPageToken"], "page-2");
    assert_eq!(value["reviews"][0]["lastModified"], "2023-11-14T22:13:20.000Z");
    assert_eq!(value["reviews"][0]["developerReply"]["text"], "Thank you!");
    assert_eq!(
        value["reviews"][0]["developerReply"]["lastModified"],
        "2023-11-14T22:23:20.000Z"
    );
    assert!(value["reviews"][1].get("developerReply").is_none());
}

#[tokio::test]
async fn test_reviews_forward_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/applications/{}/reviews", PKG)))
        .and(query_param("maxResults", "5"))
        .and(query_param("token", "page-2"))
        .and(query_param_is_missing("translationLanguage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call(
            "get-reviews",
            serde_json::json!({"packageName": PKG, "maxResults": 5, "pageToken": "page-2"}),
        )
        .await
        .unwrap();
    let value = json_of(&result);

    assert_eq!(value, serde_json::json!({"totalReviews": 0, "reviews": []}));
}

#[tokio::test]
async fn test_reviews_out_of_range_never_calls_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    for max_results in [0, 101] {
        let err = registry
            .call(
                "get-reviews",
                serde_json::json!({"packageName": PKG, "maxResults": max_results}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArguments { .. }));
    }
}

#[tokio::test]
async fn test_get_review_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/applications/{}/reviews/r9", PKG)))
        .and(query_param("translationLanguage", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "reviewId": "r9",
            "authorName": "Hedy",
            "comments": [{"userComment": {
                "text": "Sehr gut",
                "originalText": "Very good",
                "starRating": 4,
                "deviceMetadata": {"manufacturer": "Samsung", "deviceClass": "tablet", "screenDensityDpi": 320}
            }}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call(
            "get-review",
            serde_json::json!({"packageName": PKG, "reviewId": "r9", "translationLanguage": "de"}),
        )
        .await
        .unwrap();
    let value = json_of(&result);

    assert_eq!(value["reviewId"], "r9");
    assert_eq!(value["text"], "Sehr gut");
    assert_eq!(value["originalText"], "Very good");
    assert_eq!(value["deviceMetadata"]["manufacturer"], "Samsung");
    assert!(value.get("developerReply").is_none());
}

#[tokio::test]
async fn test_get_review_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/applications/{}/reviews/missing", PKG)))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {"code": 404, "message": "Review not found.", "status": "NOT_FOUND"}
        })))
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call(
            "get-review",
            serde_json::json!({"packageName": PKG, "reviewId": "missing"}),
        )
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        result.text_content(),
        "Error: API error (status 404): Review not found."
    );
}

#[tokio::test]
async fn test_unreachable_api_is_error_result() {
    // Bind then drop a server so the port refuses connections
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let settings = PublisherSettings::new(Some(CredentialSource::AccessToken("t".into())))
        .with_base_url(uri);
    let registry = default_registry(settings).unwrap();

    let result = registry
        .call("get-reviews", serde_json::json!({"packageName": PKG}))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(result.text_content().starts_with("Error: "));
}

#[tokio::test]
async fn test_missing_credentials_reported_by_every_tool() {
    let registry = default_registry(PublisherSettings::from_key_path(None)).unwrap();

    let calls = [
        ("get-app-details", serde_json::json!({"packageName": PKG})),
        ("get-release-tracks", serde_json::json!({"packageName": PKG})),
        ("get-reviews", serde_json::json!({"packageName": PKG})),
        ("get-review", serde_json::json!({"packageName": PKG, "reviewId": "r1"})),
        ("get-bundle-details", serde_json::json!({"packageName": PKG})),
    ];

    for (tool, args) in calls {
        let result = registry.call(tool, args).await.unwrap();
        assert_eq!(result.is_error, Some(true), "{} should fail", tool);
        assert!(result
            .text_content()
            .starts_with("Error: GOOGLE_SERVICE_ACCOUNT_KEY environment variable is required."));
    }
}

#[tokio::test]
async fn test_reviews_integral_float_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/applications/{}/reviews", PKG)))
        .and(query_param("maxResults", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call(
            "get-reviews",
            serde_json::json!({"packageName": PKG, "maxResults": 20.0}),
        )
        .await
        .unwrap();
    let value = json_of(&result);

    assert_eq!(value["totalReviews"], 0);
}
