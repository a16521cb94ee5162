use crate::{Story, StoryId, StoryList, User};

/// Which collection a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    All,
    Favorites,
    Own,
}

impl ListKind {
    /// Text shown in place of rows when the list is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            ListKind::All => "No stories yet!",
            ListKind::Favorites => "No favorites added!",
            ListKind::Own => "No stories added by user yet!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRowView {
    pub story_id: StoryId,
    pub title: String,
    pub url: String,
    pub hostname: String,
    pub author: String,
    pub posted_by: String,
    /// `None` when nobody is logged in, so no star is shown at all.
    pub favorite: Option<bool>,
    /// Whether edit/delete controls apply.
    pub owned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryListView {
    pub kind: ListKind,
    pub rows: Vec<StoryRowView>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub username: String,
    pub name: String,
    /// Account creation date as `YYYY-MM-DD`.
    pub joined: String,
    pub story_count: usize,
    pub favorite_count: usize,
}

impl ProfileView {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            name: user.name().to_string(),
            joined: user.created_at().format("%Y-%m-%d").to_string(),
            story_count: user.own_stories().len(),
            favorite_count: user.favorites().len(),
        }
    }
}

pub fn story_row(story: &Story, user: Option<&User>) -> StoryRowView {
    StoryRowView {
        story_id: story.story_id.clone(),
        title: story.title.clone(),
        url: story.url.clone(),
        hostname: story.hostname(),
        author: story.author.clone(),
        posted_by: story.username.clone(),
        favorite: user.map(|user| user.is_favorite(story)),
        owned: user.is_some_and(|user| user.owns_story(story)),
    }
}

/// Builds the listing for `kind`. Favorites and own lists are empty when no
/// user is logged in.
pub fn story_list_view(kind: ListKind, stories: &StoryList, user: Option<&User>) -> StoryListView {
    let source: &[Story] = match (kind, user) {
        (ListKind::All, _) => stories.stories(),
        (ListKind::Favorites, Some(user)) => user.favorites(),
        (ListKind::Own, Some(user)) => user.own_stories(),
        (ListKind::Favorites | ListKind::Own, None) => &[],
    };
    let rows: Vec<StoryRowView> = source.iter().map(|story| story_row(story, user)).collect();
    let empty_message = rows.is_empty().then(|| kind.empty_message());
    StoryListView {
        kind,
        rows,
        empty_message,
    }
}
