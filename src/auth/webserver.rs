//! [`Authenticator`] that trusts the web server's own authentication.

use async_trait::async_trait;
use loginldap_core::auth::{settle, AuthResult, Authenticator, Credentials};
use loginldap_core::directory::Directory;
use loginldap_core::user::{LocalUser, UserStore, UserSynchronizer};
use loginldap_core::Error;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Derives the login from a pre-authenticated identity by cutting off the realm, i.e. everything
/// from the first `@` on.
///
/// ```rust
/// use loginldap::auth::normalize_remote_user;
///
/// assert_eq!(normalize_remote_user("jdoe@CORP.EXAMPLE"), "jdoe");
/// assert_eq!(normalize_remote_user("jdoe"), "jdoe");
/// ```
pub fn normalize_remote_user(identity: &str) -> &str {
    identity.split_once('@').map_or(identity, |(login, _)| login)
}

/// [`Authenticator`] for applications running behind a web server that already authenticated the
/// user, for example through Kerberos/SPNEGO or client certificates, and passes the identity on
/// as `REMOTE_USER`.
///
/// When [`Credentials::remote_user`] is set the identity is trusted without a password check: the
/// realm is stripped, the user is optionally synchronized from the directory and the local record
/// is returned. Without it the attempt goes to the fallback authenticator untouched.
///
/// A directory that cannot be reached is reported as `Err`, any other failure along the trusted
/// path as [`AuthResult::Failure`].
#[derive(Debug, Clone)]
pub struct WebServerAuthenticator {
    directory: Arc<dyn Directory>,
    users: Arc<dyn UserStore>,
    synchronizer: Arc<dyn UserSynchronizer>,
    synchronize_after_login: bool,
    fallback: Arc<dyn Authenticator>,
}

impl WebServerAuthenticator {
    /// Wires the authenticator. Synchronization after login starts out enabled.
    pub fn new(
        directory: Arc<dyn Directory>,
        users: Arc<dyn UserStore>,
        synchronizer: Arc<dyn UserSynchronizer>,
        fallback: Arc<dyn Authenticator>,
    ) -> Self {
        WebServerAuthenticator {
            directory,
            users,
            synchronizer,
            synchronize_after_login: true,
            fallback,
        }
    }

    /// Whether pre-authenticated users are synchronized from the directory.
    pub fn synchronize_after_login(&self) -> bool {
        self.synchronize_after_login
    }

    /// Enables or disables synchronization of pre-authenticated users.
    pub fn set_synchronize_after_login(&mut self, synchronize: bool) {
        self.synchronize_after_login = synchronize;
    }

    /// The authenticator used when no pre-authenticated identity is present.
    pub fn fallback(&self) -> &Arc<dyn Authenticator> {
        &self.fallback
    }

    /// Replaces the fallback authenticator.
    pub fn set_fallback(&mut self, fallback: Arc<dyn Authenticator>) {
        self.fallback = fallback;
    }

    async fn trusted_login(&self, login: &str) -> Result<LocalUser, Error> {
        if self.synchronize_after_login {
            match self.directory.get_user(login).await? {
                Some(entry) => {
                    debug!(dn = %entry.dn, "Synchronizing pre-authenticated user");
                    // The directory may match the login case-insensitively, the store keys on the
                    // synchronized login.
                    let user = self.synchronizer.synchronize(&entry).await?;
                    #[cfg(feature = "prometheus")]
                    crate::metrics::add_sync_metric();
                    return Ok(user);
                }
                None => warn!(login, "Pre-authenticated user not found in directory, skipping synchronization"),
            }
        } else {
            debug!("Synchronization after login is disabled");
        }

        self.users.get_user_for_login(login).await
    }
}

#[async_trait]
impl Authenticator for WebServerAuthenticator {
    #[tracing_attributes::instrument(skip(self))]
    async fn authenticate(&self, login: &str, creds: &Credentials) -> Result<AuthResult, Error> {
        let Some(remote_user) = creds.remote_user() else {
            debug!(fallback = self.fallback.name(), "No pre-authenticated user, using fallback");
            let result = self.fallback.authenticate(login, creds).await;
            #[cfg(feature = "prometheus")]
            crate::metrics::add_login_metric(crate::metrics::PATH_FALLBACK, &result);
            return result;
        };

        let login = normalize_remote_user(remote_user);
        info!(remote_user, login, "Found pre-authenticated user");

        let result = settle(login, self.trusted_login(login).await);
        #[cfg(feature = "prometheus")]
        crate::metrics::add_login_metric(crate::metrics::PATH_WEBSERVER, &result);
        result
    }

    fn name(&self) -> &str {
        "webserver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realm_is_cut_at_first_at_sign() {
        assert_eq!(normalize_remote_user("jdoe@corp.example"), "jdoe");
        assert_eq!(normalize_remote_user("jdoe@corp@example"), "jdoe");
        assert_eq!(normalize_remote_user("jdoe"), "jdoe");
        assert_eq!(normalize_remote_user("@corp.example"), "");
        assert_eq!(normalize_remote_user("CORP\\jdoe"), "CORP\\jdoe");
    }
}
