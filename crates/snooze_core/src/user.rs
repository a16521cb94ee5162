use std::fmt;

use chrono::{DateTime, Utc};

use crate::story::{self, Story, StoryId};

/// Opaque credential issued by the service. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginToken(String);

impl LoginToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for LoginToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoginToken(<redacted>)")
    }
}

/// The signed-in account together with its authored and favorited stories.
///
/// Only built from a successful signup, login or token re-login. The two story
/// collections are snapshots owned by the user and are reconciled explicitly by
/// the operations that mutate stories; they are not views into a `StoryList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    name: String,
    created_at: DateTime<Utc>,
    favorites: Vec<Story>,
    own_stories: Vec<Story>,
    login_token: LoginToken,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        favorites: Vec<Story>,
        own_stories: Vec<Story>,
        login_token: LoginToken,
    ) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            created_at,
            favorites: story::dedup_by_id(favorites),
            own_stories: story::dedup_by_id(own_stories),
            login_token,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn login_token(&self) -> &LoginToken {
        &self.login_token
    }

    pub fn favorites(&self) -> &[Story] {
        &self.favorites
    }

    pub fn own_stories(&self) -> &[Story] {
        &self.own_stories
    }

    pub fn is_favorite(&self, story: &Story) -> bool {
        self.is_favorite_id(&story.story_id)
    }

    pub fn is_favorite_id(&self, id: &StoryId) -> bool {
        story::position(&self.favorites, id).is_some()
    }

    pub fn owns_story(&self, story: &Story) -> bool {
        self.owns_story_id(&story.story_id)
    }

    pub fn owns_story_id(&self, id: &StoryId) -> bool {
        story::position(&self.own_stories, id).is_some()
    }

    /// Appends `story` to the favorites. Returns `false` if it was already there.
    pub fn mark_favorite(&mut self, story: Story) -> bool {
        if self.is_favorite(&story) {
            return false;
        }
        self.favorites.push(story);
        true
    }

    pub fn unmark_favorite(&mut self, id: &StoryId) -> Option<Story> {
        story::remove_by_id(&mut self.favorites, id)
    }

    /// Records a story this user just posted, newest first.
    pub fn record_own_story(&mut self, story: Story) {
        story::insert_front(&mut self.own_stories, story);
    }

    /// Refreshes every copy of `story` this user holds. Returns `true` if any
    /// copy was replaced.
    pub fn refresh_story(&mut self, story: &Story) -> bool {
        let own = story::replace_by_id(&mut self.own_stories, story.clone());
        let favorite = story::replace_by_id(&mut self.favorites, story.clone());
        own || favorite
    }

    /// Drops a deleted story from both the authored list and the favorites.
    pub fn forget_story(&mut self, id: &StoryId) {
        story::remove_by_id(&mut self.own_stories, id);
        story::remove_by_id(&mut self.favorites, id);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
