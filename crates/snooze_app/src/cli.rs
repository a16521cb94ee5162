use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogDestination;

/// Browse, post and favorite stories on a hack-or-snooze service.
#[derive(Debug, Parser)]
#[command(name = "snooze", version)]
pub struct Cli {
    /// Root URL of the story service.
    #[arg(long, env = "SNOOZE_BASE_URL", default_value = snooze_client::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory holding the stored session and the log file.
    #[arg(long, env = "SNOOZE_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all stories.
    Stories,
    /// List your favorite stories.
    Favorites,
    /// List the stories you posted.
    Mine,
    /// Create an account and stay logged in.
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Log in and stay logged in.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Post a new story.
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        url: String,
    },
    /// Edit one of your stories.
    Edit {
        story_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Delete one of your stories.
    Delete { story_id: String },
    /// Mark a story as favorite.
    Favorite { story_id: String },
    /// Remove a story from your favorites.
    Unfavorite { story_id: String },
    /// Show your profile, or change name and password.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

impl Command {
    /// Whether a stored session should be restored before running.
    pub fn uses_stored_session(&self) -> bool {
        !matches!(
            self,
            Command::Signup { .. } | Command::Login { .. } | Command::Logout
        )
    }
}
