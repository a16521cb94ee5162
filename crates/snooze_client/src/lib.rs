//! Snooze client: HTTP access to the story service and session persistence.
mod api;
mod credentials;
mod persist;
pub mod stories;
mod types;
pub mod users;
mod wire;

pub use api::{ApiSettings, ReqwestStoryApi, StoryApi, DEFAULT_BASE_URL};
pub use credentials::{CredentialStore, StoredCredentials, CREDENTIALS_FILENAME};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use types::{ApiError, FailureKind};
pub use wire::{Authenticated, UserPayload};
