use chrono::{TimeZone, Utc};
use snooze_core::{
    story_list_view, ListKind, LoginToken, ProfileView, Story, StoryId, StoryList, User,
    INVALID_HOSTNAME,
};

fn story(id: &str, url: &str) -> Story {
    Story {
        story_id: StoryId::new(id),
        title: format!("story {id}"),
        author: "Author".to_string(),
        url: url.to_string(),
        username: "poster".to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap(),
        updated_at: None,
    }
}

#[test]
fn anonymous_listing_has_no_stars_or_ownership() {
    let list = StoryList::new(vec![story("a", "https://a.example.com/x"), story("b", "bogus")]);

    let view = story_list_view(ListKind::All, &list, None);

    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.empty_message, None);
    assert_eq!(view.rows[0].hostname, "a.example.com");
    assert_eq!(view.rows[1].hostname, INVALID_HOSTNAME);
    assert!(view.rows.iter().all(|row| row.favorite.is_none() && !row.owned));
}

#[test]
fn logged_in_listing_marks_favorites_and_own_stories() {
    let list = StoryList::new(vec![story("a", "https://a.test"), story("b", "https://b.test")]);
    let user = User::new(
        "alice",
        "Alice",
        Utc.with_ymd_and_hms(2022, 3, 4, 0, 0, 0).unwrap(),
        vec![story("b", "https://b.test")],
        vec![story("a", "https://a.test")],
        LoginToken::new("t"),
    );

    let view = story_list_view(ListKind::All, &list, Some(&user));

    assert_eq!(view.rows[0].favorite, Some(false));
    assert!(view.rows[0].owned);
    assert_eq!(view.rows[1].favorite, Some(true));
    assert!(!view.rows[1].owned);
}

#[test]
fn empty_user_lists_carry_messages() {
    let user = User::new(
        "bob",
        "Bob",
        Utc.with_ymd_and_hms(2021, 12, 31, 23, 0, 0).unwrap(),
        Vec::new(),
        Vec::new(),
        LoginToken::new("t"),
    );
    let list = StoryList::default();

    let favorites = story_list_view(ListKind::Favorites, &list, Some(&user));
    assert_eq!(favorites.empty_message, Some("No favorites added!"));

    let own = story_list_view(ListKind::Own, &list, Some(&user));
    assert_eq!(own.empty_message, Some("No stories added by user yet!"));

    let profile = ProfileView::from_user(&user);
    assert_eq!(profile.joined, "2021-12-31");
    assert_eq!(profile.story_count, 0);
}
