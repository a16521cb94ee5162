use snooze_client::{stories, users, ApiError, CredentialStore, ReqwestStoryApi, StoredCredentials};
use snooze_core::{StoryList, User};
use snooze_logging::{snooze_debug, snooze_error};

/// Everything one run of the binary works on: the API handle, the stored
/// credentials, the browsing list and the signed-in user, if any.
pub struct Session {
    pub api: ReqwestStoryApi,
    pub store: CredentialStore,
    pub stories: StoryList,
    pub user: Option<User>,
}

impl Session {
    pub fn new(api: ReqwestStoryApi, store: CredentialStore) -> Self {
        Self {
            api,
            store,
            stories: StoryList::default(),
            user: None,
        }
    }

    /// Silently re-authenticates from stored credentials. Leaves `user` empty
    /// when nothing is stored or the service rejects the token.
    pub async fn restore(&mut self) {
        let Some(credentials) = self.store.load() else {
            snooze_debug!("No stored credentials");
            return;
        };
        self.user = users::login_via_stored_credentials(
            &self.api,
            credentials.login_token(),
            &credentials.username,
        )
        .await;
    }

    pub async fn load_stories(&mut self) -> Result<(), ApiError> {
        self.stories = stories::fetch_all(&self.api).await?;
        Ok(())
    }

    /// Makes `user` the signed-in user and stores its credentials.
    /// A failed write is logged; the user stays signed in for this run.
    pub fn sign_in(&mut self, user: User) -> &User {
        if let Err(err) = self.store.save(&StoredCredentials::for_user(&user)) {
            snooze_error!(
                "Failed to store credentials in {:?}: {}",
                self.store.dir(),
                err
            );
        }
        self.user.insert(user)
    }
}
