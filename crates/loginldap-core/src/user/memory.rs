use super::{LocalUser, UserStore};
use crate::Error;
use async_trait::async_trait;
use dashmap::DashMap;

/// [`UserStore`] kept in memory. Logins are case-sensitive.
///
/// # Example
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use loginldap_core::user::{InMemoryUserStore, LocalUser, UserStore};
///
/// let store = InMemoryUserStore::new();
/// store.save_user(LocalUser::new("alice", "alice@example.org")).await.unwrap();
/// assert_eq!(store.get_user("alice").await.unwrap().unwrap().email, "alice@example.org");
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, LocalUser>,
}

impl InMemoryUserStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with `users`.
    pub fn with_users<I: IntoIterator<Item = LocalUser>>(users: I) -> Self {
        InMemoryUserStore {
            users: users.into_iter().map(|u| (u.login.clone(), u)).collect(),
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True if no user is stored.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user(&self, login: &str) -> Result<Option<LocalUser>, Error> {
        Ok(self.users.get(login).map(|u| u.value().clone()))
    }

    async fn save_user(&self, user: LocalUser) -> Result<(), Error> {
        tracing::debug!(login = %user.login, "Saving local user");
        self.users.insert(user.login.clone(), user);
        Ok(())
    }
}
