//! Snooze core: story and user models with their local reconciliation rules.
mod input;
mod story;
mod story_list;
mod user;
mod view_model;

pub use input::{NewStory, ProfileUpdate, StoryUpdate};
pub use story::{Story, StoryId, INVALID_HOSTNAME};
pub use story_list::StoryList;
pub use user::{LoginToken, User};
pub use view_model::{
    story_list_view, story_row, ListKind, ProfileView, StoryListView, StoryRowView,
};
