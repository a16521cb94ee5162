use std::time::Duration;

use serde_json::json;
use snooze_client::{ApiSettings, FailureKind, ReqwestStoryApi, StoryApi};
use snooze_core::{LoginToken, StoryId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn rejects_unparsable_base_url() {
    let err = ReqwestStoryApi::new(ApiSettings::with_base_url("not a url")).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);

    let err = ReqwestStoryApi::new(ApiSettings::with_base_url("mailto:x@example.com")).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stories": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ReqwestStoryApi::new(ApiSettings::with_base_url(format!("{}/v3/", server.uri())))
        .unwrap();

    assert!(api.list_stories().await.expect("list ok").is_empty());
}

#[tokio::test]
async fn path_segments_are_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/a%20b/favorites/id%2Fwith%2Fslash"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = ReqwestStoryApi::new(ApiSettings::with_base_url(server.uri())).unwrap();

    api.add_favorite(
        &LoginToken::new("tok"),
        "a b",
        &StoryId::new("id/with/slash"),
    )
    .await
    .expect("favorite ok");
}

#[tokio::test]
async fn undecodable_body_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let api = ReqwestStoryApi::new(ApiSettings::with_base_url(server.uri())).unwrap();

    let err = api.list_stories().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "stories": [] })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::with_base_url(server.uri())
    };
    let api = ReqwestStoryApi::new(settings).unwrap();

    let err = api.list_stories().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn status_without_error_body_uses_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let api = ReqwestStoryApi::new(ApiSettings::with_base_url(server.uri())).unwrap();

    let err = api.list_stories().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.message, "502 Bad Gateway");
}

#[tokio::test]
async fn timed_out_user_lookup_keeps_token_out_of_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::with_base_url(server.uri())
    };
    let api = ReqwestStoryApi::new(settings).unwrap();

    let err = api
        .get_user(&LoginToken::new("SECRET-TOKEN-123"), "alice")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
    assert!(!err.message.contains("SECRET-TOKEN-123"), "{}", err.message);
    assert!(!format!("{err:?}").contains("SECRET-TOKEN-123"));
}

#[tokio::test]
async fn unreachable_user_lookup_keeps_token_out_of_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let api = ReqwestStoryApi::new(ApiSettings::with_base_url(uri)).unwrap();

    let err = api
        .get_user(&LoginToken::new("SECRET-TOKEN-456"), "alice")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.to_string().contains("SECRET-TOKEN-456"));
}
