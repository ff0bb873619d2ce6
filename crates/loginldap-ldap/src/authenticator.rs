//! [`Authenticator`] that checks passwords with a direct LDAP bind.

use async_trait::async_trait;
use loginldap_core::auth::{settle, AuthResult, Authenticator, Credentials};
use loginldap_core::directory::Directory;
use loginldap_core::user::{LocalUser, UserSynchronizer};
use loginldap_core::{Error, ErrorKind};
use std::sync::Arc;
use tracing::debug;

/// [`Authenticator`] that looks the login up in the directory, binds as the entry found with the
/// given password and, on success, synchronizes the entry into local storage.
#[derive(Debug, Clone)]
pub struct LdapAuthenticator {
    directory: Arc<dyn Directory>,
    synchronizer: Arc<dyn UserSynchronizer>,
}

impl LdapAuthenticator {
    /// Creates the authenticator.
    pub fn new(directory: Arc<dyn Directory>, synchronizer: Arc<dyn UserSynchronizer>) -> Self {
        LdapAuthenticator { directory, synchronizer }
    }
}

#[async_trait]
impl Authenticator for LdapAuthenticator {
    #[tracing_attributes::instrument(skip(self))]
    async fn authenticate(&self, login: &str, creds: &Credentials) -> Result<AuthResult, Error> {
        let outcome = bind_and_synchronize(self.directory.as_ref(), self.synchronizer.as_ref(), login, creds.password()).await;
        settle(login, outcome)
    }

    fn name(&self) -> &str {
        "ldap"
    }
}

pub(crate) async fn bind_and_synchronize(
    directory: &dyn Directory,
    synchronizer: &dyn UserSynchronizer,
    login: &str,
    password: &str,
) -> Result<LocalUser, Error> {
    if login.is_empty() {
        return Err(Error::new(ErrorKind::UserNotFound, "empty login"));
    }

    let entry = directory
        .get_user(login)
        .await?
        .ok_or_else(|| Error::new(ErrorKind::UserNotFound, format!("no directory entry for login '{}'", login)))?;
    debug!(dn = %entry.dn, "Found directory entry");

    if !directory.verify_password(&entry, password).await? {
        return Err(Error::new(ErrorKind::InvalidCredentials, format!("bind as {} rejected", entry.dn)));
    }

    synchronizer.synchronize(&entry).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeMappings;
    use crate::synchronizer::LdapUserSynchronizer;
    use crate::testing::FakeDirectory;
    use loginldap_core::user::{InMemoryUserStore, UserStore};
    use pretty_assertions::assert_eq;

    fn authenticator(directory: FakeDirectory, store: Arc<InMemoryUserStore>) -> LdapAuthenticator {
        let synchronizer = Arc::new(LdapUserSynchronizer::new(AttributeMappings::default(), store));
        LdapAuthenticator::new(Arc::new(directory), synchronizer)
    }

    #[tokio::test]
    async fn good_password_synchronizes_and_succeeds() {
        let store = Arc::new(InMemoryUserStore::new());
        let auth = authenticator(FakeDirectory::with_user("jdoe", "s3cret"), store.clone());

        let result = auth.authenticate("jdoe", &"s3cret".into()).await.unwrap();

        assert_eq!(result.user().map(|u| u.login.as_str()), Some("jdoe"));
        assert!(store.get_user("jdoe").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn bad_password_fails_without_synchronizing() {
        let store = Arc::new(InMemoryUserStore::new());
        let auth = authenticator(FakeDirectory::with_user("jdoe", "s3cret"), store.clone());

        let result = auth.authenticate("jdoe", &"guess".into()).await.unwrap();

        assert!(!result.is_success());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unknown_login_fails() {
        let auth = authenticator(FakeDirectory::default(), Arc::new(InMemoryUserStore::new()));
        assert!(!auth.authenticate("ghost", &"x".into()).await.unwrap().is_success());
        assert!(!auth.authenticate("", &"x".into()).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn unreachable_directory_is_propagated() {
        let auth = authenticator(FakeDirectory::unreachable(), Arc::new(InMemoryUserStore::new()));
        let err = auth.authenticate("jdoe", &"s3cret".into()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CannotConnect);
    }
}
