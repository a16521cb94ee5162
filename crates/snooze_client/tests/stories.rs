use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use snooze_client::{stories, ApiSettings, FailureKind, ReqwestStoryApi};
use snooze_core::{LoginToken, NewStory, Story, StoryId, StoryList, StoryUpdate, User};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "tok-alice";

fn story_json(id: &str, title: &str, username: &str) -> Value {
    json!({
        "storyId": id,
        "title": title,
        "author": "Some Author",
        "url": format!("https://{id}.example.com/post"),
        "username": username,
        "createdAt": "2024-02-01T10:00:00.000Z",
        "updatedAt": "2024-02-01T10:00:00.000Z"
    })
}

fn story(id: &str, title: &str, username: &str) -> Story {
    serde_json::from_value(story_json(id, title, username)).unwrap()
}

fn alice(own: Vec<Story>, favorites: Vec<Story>) -> User {
    User::new(
        "alice",
        "Alice",
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        favorites,
        own,
        LoginToken::new(TOKEN),
    )
}

fn api_for(server: &MockServer) -> ReqwestStoryApi {
    ReqwestStoryApi::new(ApiSettings::with_base_url(server.uri())).unwrap()
}

fn ids(stories: &[Story]) -> Vec<&str> {
    stories.iter().map(|s| s.story_id.as_str()).collect()
}

#[tokio::test]
async fn fetch_all_keeps_service_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [
                story_json("s3", "third", "bob"),
                story_json("s1", "first", "carol"),
                story_json("s2", "second", "bob"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = stories::fetch_all(&api_for(&server)).await.expect("fetch ok");

    assert_eq!(ids(list.stories()), vec!["s3", "s1", "s2"]);
    assert_eq!(list.stories()[0].hostname(), "s3.example.com");
}

#[tokio::test]
async fn fetch_all_reports_server_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = stories::fetch_all(&api_for(&server)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn add_story_puts_service_copy_first_in_both_lists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stories"))
        .and(body_json(json!({
            "token": TOKEN,
            "story": {
                "title": "New one",
                "author": "Me",
                "url": "https://new.example.com"
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "story": story_json("fresh", "New one", "alice") })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut list = StoryList::new(vec![story("old", "old", "bob")]);
    let mut user = alice(vec![story("mine", "mine", "alice")], Vec::new());
    let input = NewStory {
        title: "New one".to_string(),
        author: "Me".to_string(),
        url: "https://new.example.com".to_string(),
    };

    let created = stories::add_story(&api_for(&server), &mut list, &mut user, &input)
        .await
        .expect("create ok");

    assert_eq!(created.story_id, StoryId::new("fresh"));
    assert_eq!(list.stories()[0].story_id, created.story_id);
    assert_eq!(user.own_stories()[0].story_id, created.story_id);
    assert_eq!(ids(list.stories()), vec!["fresh", "old"]);
    assert_eq!(ids(user.own_stories()), vec!["fresh", "mine"]);
    assert!(user.owns_story(&created));
}

#[tokio::test]
async fn add_story_failure_leaves_lists_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "title": "Unauthorized", "message": "Invalid token." }
        })))
        .mount(&server)
        .await;

    let mut list = StoryList::new(vec![story("old", "old", "bob")]);
    let mut user = alice(Vec::new(), Vec::new());
    let input = NewStory {
        title: "t".to_string(),
        author: "a".to_string(),
        url: "https://x.test".to_string(),
    };

    let err = stories::add_story(&api_for(&server), &mut list, &mut user, &input)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(401));
    assert_eq!(err.message, "Invalid token.");
    assert_eq!(ids(list.stories()), vec!["old"]);
    assert!(user.own_stories().is_empty());
}

#[tokio::test]
async fn remove_story_clears_every_collection() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/stories/gone"))
        .and(body_json(json!({ "token": TOKEN })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "deleted",
            "story": story_json("gone", "gone", "alice")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gone = story("gone", "gone", "alice");
    let mut list = StoryList::new(vec![story("keep", "keep", "bob"), gone.clone()]);
    let mut user = alice(vec![gone.clone()], vec![gone.clone()]);

    stories::remove_story(&api_for(&server), &mut list, &mut user, &gone.story_id)
        .await
        .expect("delete ok");

    assert_eq!(ids(list.stories()), vec!["keep"]);
    assert!(!user.owns_story(&gone));
    assert!(!user.is_favorite(&gone));
}

#[tokio::test]
async fn remove_unknown_story_still_calls_service_and_propagates_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/stories/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut list = StoryList::new(vec![story("keep", "keep", "bob")]);
    let mut user = alice(Vec::new(), Vec::new());

    let err = stories::remove_story(
        &api_for(&server),
        &mut list,
        &mut user,
        &StoryId::new("missing"),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(ids(list.stories()), vec!["keep"]);
}

#[tokio::test]
async fn update_story_stores_service_value_not_raw_patch() {
    let server = MockServer::start().await;
    // The service normalizes the title; only the title is sent.
    Mock::given(method("PATCH"))
        .and(path("/stories/edit-me"))
        .and(body_json(json!({
            "token": TOKEN,
            "story": { "title": "  messy title " }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "story": story_json("edit-me", "messy title", "alice")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let original = story("edit-me", "before", "alice");
    let mut list = StoryList::new(vec![story("a", "a", "bob"), original.clone()]);
    let mut user = alice(vec![original.clone()], vec![original.clone()]);
    let patch = StoryUpdate {
        title: Some("  messy title ".to_string()),
        ..StoryUpdate::default()
    };

    let updated = stories::update_story(
        &api_for(&server),
        &mut list,
        &mut user,
        &original.story_id,
        &patch,
    )
    .await
    .expect("update ok");

    assert_eq!(updated.title, "messy title");
    assert_eq!(list.find(&original.story_id), Some(&updated));
    assert_eq!(list.stories()[1], updated);
    assert_eq!(user.own_stories()[0], updated);
    assert_eq!(user.favorites()[0], updated);
}

#[tokio::test]
async fn update_missing_story_fails() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/stories/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "status": 404, "title": "Not Found", "message": "No story with ID 'nope'" }
        })))
        .mount(&server)
        .await;

    let mut list = StoryList::default();
    let mut user = alice(Vec::new(), Vec::new());

    let err = stories::update_story(
        &api_for(&server),
        &mut list,
        &mut user,
        &StoryId::new("nope"),
        &StoryUpdate::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert!(list.is_empty());
}
