use std::fmt::Write;

use snooze_core::{story_row, ProfileView, Story, StoryListView, StoryRowView, User};

pub fn story_list(view: &StoryListView) -> String {
    if let Some(message) = view.empty_message {
        return message.to_string();
    }
    view.rows
        .iter()
        .map(format_row)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn story_line(story: &Story, user: Option<&User>) -> String {
    format_row(&story_row(story, user))
}

fn format_row(row: &StoryRowView) -> String {
    let star = match row.favorite {
        Some(true) => "[*] ",
        Some(false) => "[ ] ",
        None => "",
    };
    let owned = if row.owned { " [mine]" } else { "" };
    format!(
        "{star}{title} ({hostname}){owned}\n    by {author} | posted by {posted_by} | id {id}\n    {url}",
        title = row.title,
        hostname = row.hostname,
        author = row.author,
        posted_by = row.posted_by,
        id = row.story_id,
        url = row.url,
    )
}

pub fn profile(view: &ProfileView) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}'s Profile", view.username);
    let _ = writeln!(text, "Name: {}", view.name);
    let _ = writeln!(text, "Joined: {}", view.joined);
    let _ = write!(
        text,
        "Stories: {} | Favorites: {}",
        view.story_count, view.favorite_count
    );
    text
}
