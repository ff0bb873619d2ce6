//! Local user storage: the [`LocalUser`] record, the [`UserStore`] that keeps it and the
//! [`UserSynchronizer`] that fills it from directory records.

use crate::Error;
use crate::directory::DirectoryUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

mod memory;
pub use memory::InMemoryUserStore;

/// A user as known to the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUser {
    /// Unique login name.
    pub login: String,
    /// Contact address.
    pub email: String,
    /// Display name.
    pub alias: String,
    /// Whether the user has full administrative access.
    #[serde(default)]
    pub superuser: bool,
    /// Set on records created or updated from a directory entry.
    #[serde(default)]
    pub directory_managed: bool,
}

impl LocalUser {
    /// A regular user whose alias equals its login.
    pub fn new<L: Into<String>, E: Into<String>>(login: L, email: E) -> Self {
        let login = login.into();
        LocalUser {
            alias: login.clone(),
            login,
            email: email.into(),
            superuser: false,
            directory_managed: false,
        }
    }
}

impl Display for LocalUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.login, self.email)
    }
}

/// Persistent local user storage.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Fetches the user for `login`, `Ok(None)` if there is none.
    async fn get_user(&self, login: &str) -> Result<Option<LocalUser>, Error>;

    /// Creates the user, or replaces the record with the same login.
    async fn save_user(&self, user: LocalUser) -> Result<(), Error>;

    /// Fetches the user for `login`, treating absence as an error of kind
    /// [`UserNotFound`](crate::ErrorKind::UserNotFound).
    async fn get_user_for_login(&self, login: &str) -> Result<LocalUser, Error> {
        self.get_user(login).await?.ok_or_else(|| {
            Error::new(crate::ErrorKind::UserNotFound, format!("no local user for login '{}'", login))
        })
    }
}

/// Reconciles directory records into local user storage.
#[async_trait]
pub trait UserSynchronizer: Send + Sync + Debug {
    /// Creates or updates the local user that corresponds to `user`. Calling it twice with the same
    /// record leaves storage as after the first call.
    async fn synchronize(&self, user: &DirectoryUser) -> Result<LocalUser, Error>;
}
