//! [`Authenticator`] for deployments where directory users and local-only users live side by side.

use crate::authenticator::bind_and_synchronize;
use async_trait::async_trait;
use loginldap_core::auth::{settle, AuthResult, Authenticator, Credentials, RejectingAuthenticator};
use loginldap_core::directory::Directory;
use loginldap_core::user::{UserStore, UserSynchronizer};
use loginldap_core::Error;
use std::sync::Arc;
use tracing::debug;

/// [`Authenticator`] that keeps local users in step with the directory.
///
/// Logins that exist locally but were never synchronized from the directory are handed to the local
/// authenticator. All other logins are checked with an LDAP bind and, on success, synchronized
/// into local storage before the local record is returned.
#[derive(Debug, Clone)]
pub struct SynchronizedAuthenticator {
    directory: Arc<dyn Directory>,
    synchronizer: Arc<dyn UserSynchronizer>,
    users: Arc<dyn UserStore>,
    local: Arc<dyn Authenticator>,
}

impl SynchronizedAuthenticator {
    /// Creates the authenticator. Local-only users are rejected until
    /// [`local_authenticator`](Self::local_authenticator) is set.
    pub fn new(directory: Arc<dyn Directory>, synchronizer: Arc<dyn UserSynchronizer>, users: Arc<dyn UserStore>) -> Self {
        SynchronizedAuthenticator {
            directory,
            synchronizer,
            users,
            local: Arc::new(RejectingAuthenticator),
        }
    }

    /// Sets the authenticator used for users that are not managed by the directory.
    pub fn local_authenticator(mut self, local: Arc<dyn Authenticator>) -> Self {
        self.local = local;
        self
    }
}

#[async_trait]
impl Authenticator for SynchronizedAuthenticator {
    #[tracing_attributes::instrument(skip(self))]
    async fn authenticate(&self, login: &str, creds: &Credentials) -> Result<AuthResult, Error> {
        match self.users.get_user(login).await {
            Ok(Some(user)) if !user.directory_managed => {
                debug!(local = self.local.name(), "Login is a local user, delegating");
                return self.local.authenticate(login, creds).await;
            }
            Ok(_) => {}
            Err(err) => return settle(login, Err(err)),
        }

        let outcome = bind_and_synchronize(self.directory.as_ref(), self.synchronizer.as_ref(), login, creds.password()).await;
        settle(login, outcome)
    }

    fn name(&self) -> &str {
        "synchronized"
    }
}
