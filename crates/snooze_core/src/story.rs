use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snooze_logging::snooze_warn;
use url::Url;

/// Marker returned by [`Story::hostname`] when the story URL cannot be parsed.
pub const INVALID_HOSTNAME: &str = "Invalid URL";

/// Service-assigned story identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single shared link, exactly as the service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub story_id: StoryId,
    pub title: String,
    pub author: String,
    pub url: String,
    /// Username of the account that posted the story.
    pub username: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Story {
    /// Host part of the story URL, or [`INVALID_HOSTNAME`] when the URL has none.
    pub fn hostname(&self) -> String {
        match Url::parse(&self.url) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => host.to_string(),
                None => {
                    snooze_warn!("URL has no host: {:?}", self.url);
                    INVALID_HOSTNAME.to_string()
                }
            },
            Err(err) => {
                snooze_warn!("Invalid URL {:?}: {}", self.url, err);
                INVALID_HOSTNAME.to_string()
            }
        }
    }
}

// Helpers shared by `StoryList` and `User`; each keeps `storyId` unique in `stories`.

pub(crate) fn position(stories: &[Story], id: &StoryId) -> Option<usize> {
    stories.iter().position(|story| &story.story_id == id)
}

pub(crate) fn dedup_by_id(stories: Vec<Story>) -> Vec<Story> {
    let mut unique: Vec<Story> = Vec::with_capacity(stories.len());
    for story in stories {
        if position(&unique, &story.story_id).is_some() {
            snooze_warn!("Dropping duplicate story {}", story.story_id);
            continue;
        }
        unique.push(story);
    }
    unique
}

pub(crate) fn insert_front(stories: &mut Vec<Story>, story: Story) {
    remove_by_id(stories, &story.story_id);
    stories.insert(0, story);
}

pub(crate) fn remove_by_id(stories: &mut Vec<Story>, id: &StoryId) -> Option<Story> {
    position(stories, id).map(|index| stories.remove(index))
}

pub(crate) fn replace_by_id(stories: &mut [Story], story: Story) -> bool {
    match position(stories, &story.story_id) {
        Some(index) => {
            stories[index] = story;
            true
        }
        None => false,
    }
}
