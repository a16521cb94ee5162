//! JSON shapes exchanged with the story service.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snooze_core::{LoginToken, NewStory, ProfileUpdate, Story, StoryUpdate, User};

/// User record as the service returns it from signup, login and user lookups.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<Story>,
    /// Stories authored by the user.
    #[serde(default)]
    pub stories: Vec<Story>,
}

impl UserPayload {
    pub fn into_user(self, token: LoginToken) -> User {
        User::new(
            self.username,
            self.name,
            self.created_at,
            self.favorites,
            self.stories,
            token,
        )
    }
}

/// Token plus user, as returned by signup and login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub token: LoginToken,
    pub user: UserPayload,
}

impl Authenticated {
    pub fn into_user(self) -> User {
        self.user.into_user(self.token)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub user: UserPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub user: UserPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoriesResponse {
    pub stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoryResponse {
    pub story: Story,
}

#[derive(Serialize)]
pub(crate) struct TokenBody<'a> {
    pub token: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NewStoryBody<'a> {
    pub token: &'a str,
    pub story: &'a NewStory,
}

#[derive(Serialize)]
pub(crate) struct StoryUpdateBody<'a> {
    pub token: &'a str,
    pub story: &'a StoryUpdate,
}

#[derive(Serialize)]
pub(crate) struct ProfileUpdateBody<'a> {
    pub token: &'a str,
    pub user: &'a ProfileUpdate,
}

#[derive(Serialize)]
pub(crate) struct SignupBody<'a> {
    pub user: SignupUser<'a>,
}

#[derive(Serialize)]
pub(crate) struct SignupUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct LoginBody<'a> {
    pub user: LoginUser<'a>,
}

#[derive(Serialize)]
pub(crate) struct LoginUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `{"error": {"status": 401, "title": "Unauthorized", "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub title: Option<String>,
    /// A string, or a list of strings for validation failures.
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

/// Best-effort extraction of the service's error text from a failure body.
pub(crate) fn service_error_message(body: &str) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_str(body).ok()?;
    let message = match parsed.error.message {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(serde_json::Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    };
    message.or(parsed.error.title)
}
