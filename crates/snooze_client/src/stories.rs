//! Story operations: one remote call each, then local reconciliation of the
//! browsing list and the acting user's own collections.
//!
//! Reconciliation runs only after the call succeeds; on error nothing local
//! changes.
use snooze_core::{NewStory, Story, StoryId, StoryList, StoryUpdate, User};
use snooze_logging::{snooze_debug, snooze_info};

use crate::{ApiError, StoryApi};

/// Loads every story, in the order the service lists them.
pub async fn fetch_all(api: &dyn StoryApi) -> Result<StoryList, ApiError> {
    let stories = api.list_stories().await?;
    snooze_debug!("Fetched {} stories", stories.len());
    Ok(StoryList::new(stories))
}

/// Posts a story as `user` and puts the service's copy at the front of both
/// `list` and the user's own stories.
pub async fn add_story(
    api: &dyn StoryApi,
    list: &mut StoryList,
    user: &mut User,
    input: &NewStory,
) -> Result<Story, ApiError> {
    let story = api.create_story(user.login_token(), input).await?;
    snooze_info!("Posted story {} as {}", story.story_id, user.username());
    list.insert_front(story.clone());
    user.record_own_story(story.clone());
    Ok(story)
}

/// Deletes a story and drops it from `list`, the user's own stories and the
/// user's favorites. Ids missing locally are ignored once the call succeeds.
pub async fn remove_story(
    api: &dyn StoryApi,
    list: &mut StoryList,
    user: &mut User,
    story_id: &StoryId,
) -> Result<(), ApiError> {
    api.delete_story(user.login_token(), story_id).await?;
    if list.remove(story_id).is_none() {
        snooze_debug!("Deleted story {} was not in the local list", story_id);
    }
    user.forget_story(story_id);
    snooze_info!("Deleted story {}", story_id);
    Ok(())
}

/// Applies a partial edit and swaps the service-returned story into `list` and
/// every copy the user holds.
pub async fn update_story(
    api: &dyn StoryApi,
    list: &mut StoryList,
    user: &mut User,
    story_id: &StoryId,
    update: &StoryUpdate,
) -> Result<Story, ApiError> {
    let story = api.update_story(user.login_token(), story_id, update).await?;
    if !list.replace(story.clone()) {
        snooze_debug!("Updated story {} was not in the local list", story.story_id);
    }
    user.refresh_story(&story);
    snooze_info!("Updated story {}", story.story_id);
    Ok(story)
}
