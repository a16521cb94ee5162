use crate::story::{self, Story, StoryId};

/// The canonical browsing list, in service order with newly posted stories first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryList {
    stories: Vec<Story>,
}

impl StoryList {
    /// Builds a list from service data. Later duplicates of an id are dropped.
    pub fn new(stories: Vec<Story>) -> Self {
        Self {
            stories: story::dedup_by_id(stories),
        }
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn find(&self, id: &StoryId) -> Option<&Story> {
        story::position(&self.stories, id).map(|index| &self.stories[index])
    }

    /// Puts `story` at the front, replacing any entry with the same id.
    pub fn insert_front(&mut self, story: Story) {
        story::insert_front(&mut self.stories, story);
    }

    pub fn remove(&mut self, id: &StoryId) -> Option<Story> {
        story::remove_by_id(&mut self.stories, id)
    }

    /// Swaps in `story` at the position of the entry with the same id.
    /// Returns `false` (and leaves the list untouched) when no such entry exists.
    pub fn replace(&mut self, story: Story) -> bool {
        story::replace_by_id(&mut self.stories, story)
    }
}
