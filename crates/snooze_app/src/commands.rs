use anyhow::{anyhow, bail, Context};
use snooze_client::{stories, users};
use snooze_core::{
    story_list_view, ListKind, NewStory, ProfileUpdate, ProfileView, Story, StoryId, StoryUpdate,
    User,
};

use crate::cli::Command;
use crate::render;
use crate::session::Session;

/// Runs one command against `session` and returns the text to print.
pub async fn run(command: Command, session: &mut Session) -> anyhow::Result<String> {
    if command.uses_stored_session() {
        session.restore().await;
    }

    match command {
        Command::Stories => {
            session.load_stories().await?;
            let view = story_list_view(ListKind::All, &session.stories, session.user.as_ref());
            Ok(render::story_list(&view))
        }
        Command::Favorites => {
            let user = require_user(&session.user)?;
            let view = story_list_view(ListKind::Favorites, &session.stories, Some(user));
            Ok(render::story_list(&view))
        }
        Command::Mine => {
            let user = require_user(&session.user)?;
            let view = story_list_view(ListKind::Own, &session.stories, Some(user));
            Ok(render::story_list(&view))
        }
        Command::Signup {
            username,
            password,
            name,
        } => {
            let user = users::signup(&session.api, &username, &password, &name).await?;
            let user = session.sign_in(user);
            Ok(format!("Signed up and logged in as {}.", user.username()))
        }
        Command::Login { username, password } => {
            let user = users::login(&session.api, &username, &password).await?;
            let user = session.sign_in(user);
            Ok(format!("Logged in as {}.", user.username()))
        }
        Command::Logout => {
            session
                .store
                .clear()
                .context("failed to clear stored credentials")?;
            session.user = None;
            Ok("Logged out.".to_string())
        }
        Command::Submit { title, author, url } => {
            let user = require_user_mut(&mut session.user)?;
            let input = NewStory { title, author, url };
            let story =
                stories::add_story(&session.api, &mut session.stories, user, &input).await?;
            Ok(format!(
                "Posted story {}.\n{}",
                story.story_id,
                render::story_line(&story, Some(&*user))
            ))
        }
        Command::Edit {
            story_id,
            title,
            author,
            url,
        } => {
            let user = require_user_mut(&mut session.user)?;
            let story_id = StoryId::new(story_id);
            if !user.owns_story_id(&story_id) {
                bail!("You can only edit your own stories.");
            }
            let update = StoryUpdate { title, author, url };
            if update.is_empty() {
                bail!("Nothing to update: pass --title, --author or --url.");
            }
            let story = stories::update_story(
                &session.api,
                &mut session.stories,
                user,
                &story_id,
                &update,
            )
            .await?;
            Ok(format!(
                "Updated story {}.\n{}",
                story.story_id,
                render::story_line(&story, Some(&*user))
            ))
        }
        Command::Delete { story_id } => {
            let user = require_user_mut(&mut session.user)?;
            let story_id = StoryId::new(story_id);
            if !user.owns_story_id(&story_id) {
                bail!("You can only delete your own stories.");
            }
            stories::remove_story(&session.api, &mut session.stories, user, &story_id).await?;
            Ok(format!("Deleted story {story_id}."))
        }
        Command::Favorite { story_id } => {
            session.load_stories().await?;
            let user = require_user_mut(&mut session.user)?;
            let story = find_story(session.stories.stories(), user, &StoryId::new(story_id))?;
            if user.is_favorite(&story) {
                return Ok(format!("Story {} is already a favorite.", story.story_id));
            }
            users::add_favorite(&session.api, user, &story).await?;
            Ok(format!("Added story {} to favorites.", story.story_id))
        }
        Command::Unfavorite { story_id } => {
            let user = require_user_mut(&mut session.user)?;
            let story_id = StoryId::new(story_id);
            let Some(story) = user
                .favorites()
                .iter()
                .find(|story| story.story_id == story_id)
                .cloned()
            else {
                return Ok(format!("Story {story_id} is not a favorite."));
            };
            users::remove_favorite(&session.api, user, &story).await?;
            Ok(format!("Removed story {} from favorites.", story.story_id))
        }
        Command::Profile { name, password } => {
            let user = require_user_mut(&mut session.user)?;
            let update = ProfileUpdate { name, password };
            let changed = update.name.is_some() || update.password.is_some();
            if changed {
                users::update_profile(&session.api, user, &update).await?;
            }
            let mut text = render::profile(&ProfileView::from_user(user));
            if changed {
                text.push_str("\nProfile updated successfully!");
            }
            Ok(text)
        }
    }
}

fn require_user(user: &Option<User>) -> anyhow::Result<&User> {
    user.as_ref().ok_or_else(|| anyhow!("You must be logged in."))
}

fn require_user_mut(user: &mut Option<User>) -> anyhow::Result<&mut User> {
    user.as_mut().ok_or_else(|| anyhow!("You must be logged in."))
}

/// Looks a story up in the browsing list, then in the user's own collections.
fn find_story(stories: &[Story], user: &User, id: &StoryId) -> anyhow::Result<Story> {
    stories
        .iter()
        .chain(user.own_stories())
        .chain(user.favorites())
        .find(|story| &story.story_id == id)
        .cloned()
        .ok_or_else(|| anyhow!("No story with id {id}."))
}
