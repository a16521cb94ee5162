use std::future::Future;

use snooze_core::{LoginToken, ProfileUpdate, Story, User};
use snooze_logging::{snooze_info, snooze_warn};

use crate::{ApiError, FailureKind, StoryApi};

const UNAUTHORIZED: u16 = 401;
const CONFLICT: u16 = 409;

/// Registers a new account and returns it signed in.
///
/// A taken username (409) yields [`FailureKind::UsernameTaken`]; every other
/// failure yields [`FailureKind::SignupFailed`] and the cause is logged.
pub async fn signup(
    api: &dyn StoryApi,
    username: &str,
    password: &str,
    name: &str,
) -> Result<User, ApiError> {
    match api.signup(username, password, name).await {
        Ok(authenticated) => {
            snooze_info!("Signed up {}", username);
            Ok(authenticated.into_user())
        }
        Err(err) if err.status() == Some(CONFLICT) => {
            snooze_warn!("Signup for {} rejected: {}", username, err);
            Err(ApiError::new(
                FailureKind::UsernameTaken,
                "Username is already taken.",
            ))
        }
        Err(err) => {
            snooze_warn!("Signup failed ({}): {}", err.kind, err);
            Err(ApiError::new(FailureKind::SignupFailed, "Signup failed."))
        }
    }
}

/// Logs in with a password.
///
/// Bad credentials (401) yield [`FailureKind::InvalidCredentials`]; every other
/// failure yields [`FailureKind::LoginFailed`] and the cause is logged.
pub async fn login(api: &dyn StoryApi, username: &str, password: &str) -> Result<User, ApiError> {
    match api.login(username, password).await {
        Ok(authenticated) => {
            snooze_info!("Logged in {}", username);
            Ok(authenticated.into_user())
        }
        Err(err) if err.status() == Some(UNAUTHORIZED) => {
            snooze_warn!("Login for {} rejected: {}", username, err);
            Err(ApiError::new(
                FailureKind::InvalidCredentials,
                "Incorrect username or password.",
            ))
        }
        Err(err) => {
            snooze_warn!("Login failed ({}): {}", err.kind, err);
            Err(ApiError::new(FailureKind::LoginFailed, "Login failed."))
        }
    }
}

/// Re-authenticates with a previously stored token.
///
/// Runs unprompted at start-up, so any failure is logged and reported as
/// `None` rather than as an error.
pub async fn login_via_stored_credentials(
    api: &dyn StoryApi,
    token: LoginToken,
    username: &str,
) -> Option<User> {
    match api.get_user(&token, username).await {
        Ok(payload) => {
            snooze_info!("Restored session for {}", username);
            Some(payload.into_user(token))
        }
        Err(err) => {
            snooze_warn!("Stored credentials for {} rejected: {}", username, err);
            None
        }
    }
}

/// Marks `story` as a favorite locally right away, then returns the future that
/// tells the service.
///
/// The local change is not undone if the remote call fails.
pub fn add_favorite<'a>(
    api: &'a dyn StoryApi,
    user: &mut User,
    story: &Story,
) -> impl Future<Output = Result<(), ApiError>> + Send + 'a {
    user.mark_favorite(story.clone());
    let token = user.login_token().clone();
    let username = user.username().to_string();
    let story_id = story.story_id.clone();
    async move {
        api.add_favorite(&token, &username, &story_id)
            .await
            .inspect_err(|err| snooze_warn!("Adding favorite {} failed: {}", story_id, err))
    }
}

/// Unmarks `story` locally right away, then returns the future that tells the
/// service. The local change is not undone if the remote call fails.
pub fn remove_favorite<'a>(
    api: &'a dyn StoryApi,
    user: &mut User,
    story: &Story,
) -> impl Future<Output = Result<(), ApiError>> + Send + 'a {
    user.unmark_favorite(&story.story_id);
    let token = user.login_token().clone();
    let username = user.username().to_string();
    let story_id = story.story_id.clone();
    async move {
        api.remove_favorite(&token, &username, &story_id)
            .await
            .inspect_err(|err| snooze_warn!("Removing favorite {} failed: {}", story_id, err))
    }
}

/// Updates name and/or password. Only a non-empty name is applied locally.
pub async fn update_profile(
    api: &dyn StoryApi,
    user: &mut User,
    update: &ProfileUpdate,
) -> Result<(), ApiError> {
    api.update_user(user.login_token(), user.username(), update)
        .await?;
    if let Some(name) = update.name.as_deref().filter(|name| !name.is_empty()) {
        user.set_name(name);
    }
    snooze_info!("Updated profile for {}", user.username());
    Ok(())
}
