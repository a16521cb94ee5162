use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use snooze_core::{LoginToken, NewStory, ProfileUpdate, Story, StoryId, StoryUpdate};
use snooze_logging::snooze_debug;

use crate::wire::{
    service_error_message, AuthResponse, Authenticated, LoginBody, LoginUser, NewStoryBody,
    ProfileUpdateBody, SignupBody, SignupUser, StoriesResponse, StoryResponse, StoryUpdateBody,
    TokenBody, UserPayload, UserResponse,
};
use crate::{ApiError, FailureKind};

pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// One method per remote endpoint. Each call is a single round trip; none retries.
#[async_trait::async_trait]
pub trait StoryApi: Send + Sync {
    async fn list_stories(&self) -> Result<Vec<Story>, ApiError>;

    async fn create_story(&self, token: &LoginToken, story: &NewStory) -> Result<Story, ApiError>;

    async fn update_story(
        &self,
        token: &LoginToken,
        story_id: &StoryId,
        update: &StoryUpdate,
    ) -> Result<Story, ApiError>;

    async fn delete_story(&self, token: &LoginToken, story_id: &StoryId) -> Result<(), ApiError>;

    async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Authenticated, ApiError>;

    async fn login(&self, username: &str, password: &str) -> Result<Authenticated, ApiError>;

    async fn get_user(&self, token: &LoginToken, username: &str) -> Result<UserPayload, ApiError>;

    async fn update_user(
        &self,
        token: &LoginToken,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError>;

    async fn add_favorite(
        &self,
        token: &LoginToken,
        username: &str,
        story_id: &StoryId,
    ) -> Result<(), ApiError>;

    async fn remove_favorite(
        &self,
        token: &LoginToken,
        username: &str,
        story_id: &StoryId,
    ) -> Result<(), ApiError>;
}

/// [`StoryApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct ReqwestStoryApi {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestStoryApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("base url cannot hold a path: {}", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base, client })
    }

    /// Joins percent-encoded path segments onto the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        // Only the path is logged: the query may carry the login token.
        snooze_debug!("{} {}", method, url.path());
        self.client.request(method, url)
    }

    fn request_with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> RequestBuilder {
        self.request(method, url).json(body)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = service_error_message(&body).unwrap_or_else(|| status.to_string());
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            message,
        ))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::new(FailureKind::Decode, err.without_url().to_string()))
    }

    /// Sends the request and discards the success body.
    async fn send_unit(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl StoryApi for ReqwestStoryApi {
    async fn list_stories(&self) -> Result<Vec<Story>, ApiError> {
        let url = self.endpoint(&["stories"])?;
        let response: StoriesResponse = self.send_json(self.request(Method::GET, url)).await?;
        Ok(response.stories)
    }

    async fn create_story(&self, token: &LoginToken, story: &NewStory) -> Result<Story, ApiError> {
        let url = self.endpoint(&["stories"])?;
        let body = NewStoryBody {
            token: token.as_str(),
            story,
        };
        let response: StoryResponse = self
            .send_json(self.request_with_body(Method::POST, url, &body))
            .await?;
        Ok(response.story)
    }

    async fn update_story(
        &self,
        token: &LoginToken,
        story_id: &StoryId,
        update: &StoryUpdate,
    ) -> Result<Story, ApiError> {
        let url = self.endpoint(&["stories", story_id.as_str()])?;
        let body = StoryUpdateBody {
            token: token.as_str(),
            story: update,
        };
        let response: StoryResponse = self
            .send_json(self.request_with_body(Method::PATCH, url, &body))
            .await?;
        Ok(response.story)
    }

    async fn delete_story(&self, token: &LoginToken, story_id: &StoryId) -> Result<(), ApiError> {
        let url = self.endpoint(&["stories", story_id.as_str()])?;
        let body = TokenBody {
            token: token.as_str(),
        };
        self.send_unit(self.request_with_body(Method::DELETE, url, &body))
            .await
    }

    async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Authenticated, ApiError> {
        let url = self.endpoint(&["signup"])?;
        let body = SignupBody {
            user: SignupUser {
                username,
                password,
                name,
            },
        };
        let response: AuthResponse = self
            .send_json(self.request_with_body(Method::POST, url, &body))
            .await?;
        Ok(Authenticated {
            token: LoginToken::new(response.token),
            user: response.user,
        })
    }

    async fn login(&self, username: &str, password: &str) -> Result<Authenticated, ApiError> {
        let url = self.endpoint(&["login"])?;
        let body = LoginBody {
            user: LoginUser { username, password },
        };
        let response: AuthResponse = self
            .send_json(self.request_with_body(Method::POST, url, &body))
            .await?;
        Ok(Authenticated {
            token: LoginToken::new(response.token),
            user: response.user,
        })
    }

    async fn get_user(&self, token: &LoginToken, username: &str) -> Result<UserPayload, ApiError> {
        let mut url = self.endpoint(&["users", username])?;
        url.query_pairs_mut().append_pair("token", token.as_str());
        let response: UserResponse = self.send_json(self.request(Method::GET, url)).await?;
        Ok(response.user)
    }

    async fn update_user(
        &self,
        token: &LoginToken,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username])?;
        let body = ProfileUpdateBody {
            token: token.as_str(),
            user: update,
        };
        self.send_unit(self.request_with_body(Method::PATCH, url, &body))
            .await
    }

    async fn add_favorite(
        &self,
        token: &LoginToken,
        username: &str,
        story_id: &StoryId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username, "favorites", story_id.as_str()])?;
        let body = TokenBody {
            token: token.as_str(),
        };
        self.send_unit(self.request_with_body(Method::POST, url, &body))
            .await
    }

    async fn remove_favorite(
        &self,
        token: &LoginToken,
        username: &str,
        story_id: &StoryId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username, "favorites", story_id.as_str()])?;
        let body = TokenBody {
            token: token.as_str(),
        };
        self.send_unit(self.request_with_body(Method::DELETE, url, &body))
            .await
    }
}

/// The URL is stripped from the message: `get_user` carries the token in its query.
fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    let err = err.without_url();
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
