//! Typed payloads for the operations that send user-supplied fields.
use std::fmt;

use serde::Serialize;

/// Fields for posting a new story. The service assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStory {
    pub title: String,
    pub author: String,
    pub url: String,
}

/// Partial story edit; `None` fields are left out of the request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.url.is_none()
    }
}

/// Partial profile edit. The password is sent once and never kept.
#[derive(Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
