use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snooze_core::{LoginToken, User};
use snooze_logging::{snooze_info, snooze_warn};

use crate::persist::{AtomicFileWriter, PersistError};

pub const CREDENTIALS_FILENAME: &str = ".snooze_session.ron";

/// The two values kept between runs: login token and username.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub username: String,
}

impl StoredCredentials {
    pub fn for_user(user: &User) -> Self {
        Self {
            token: user.login_token().as_str().to_string(),
            username: user.username().to_string(),
        }
    }

    pub fn login_token(&self) -> LoginToken {
        LoginToken::new(self.token.clone())
    }
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// File-backed store for [`StoredCredentials`] inside a state directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILENAME)
    }

    /// Reads stored credentials. Missing, unreadable, unparsable or blank
    /// entries all mean "nothing stored"; problems are logged.
    pub fn load(&self) -> Option<StoredCredentials> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                snooze_warn!("Failed to read stored credentials from {:?}: {}", path, err);
                return None;
            }
        };

        let credentials: StoredCredentials = match ron::from_str(&content) {
            Ok(credentials) => credentials,
            Err(err) => {
                snooze_warn!("Failed to parse stored credentials from {:?}: {}", path, err);
                return None;
            }
        };

        if credentials.token.is_empty() || credentials.username.is_empty() {
            return None;
        }
        Some(credentials)
    }

    pub fn save(&self, credentials: &StoredCredentials) -> Result<(), PersistError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(credentials, pretty)
            .map_err(|err| PersistError::Serialize(err.to_string()))?;
        let writer = AtomicFileWriter::new(self.dir.clone());
        writer.write(CREDENTIALS_FILENAME, &content)?;
        snooze_info!("Saved credentials for {}", credentials.username);
        Ok(())
    }

    /// Erases both stored values.
    pub fn clear(&self) -> Result<(), PersistError> {
        AtomicFileWriter::new(self.dir.clone()).remove(CREDENTIALS_FILENAME)?;
        snooze_info!("Cleared stored credentials");
        Ok(())
    }
}
