use crate::auth::WebServerAuthenticator;
use crate::options::{FallbackStrategy, Settings};
use loginldap_core::auth::{Authenticator, RejectingAuthenticator};
use loginldap_core::directory::Directory;
use loginldap_core::user::{UserStore, UserSynchronizer};
use loginldap_core::Error;
use loginldap_ldap::{LdapAuthenticator, LdapDirectory, LdapUserSynchronizer, SynchronizedAuthenticator};
use std::sync::Arc;

/// Builds a configured [`WebServerAuthenticator`] from [`Settings`].
///
/// The directory client, the user synchronizer and the fallback authenticator are created from
/// the settings. The user store is provided by the application.
///
/// # Example
///
/// ```no_run
/// use loginldap::{Builder, Settings};
/// use loginldap_core::user::InMemoryUserStore;
/// use std::sync::Arc;
///
/// let settings = Settings::from_file("/etc/loginldap.json").unwrap();
/// let authenticator = Builder::new(settings, Arc::new(InMemoryUserStore::new()))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct Builder {
    settings: Settings,
    users: Arc<dyn UserStore>,
    local: Arc<dyn Authenticator>,
    directory: Option<Arc<dyn Directory>>,
}

impl Builder {
    /// Starts a builder writing synchronized users to `users`.
    pub fn new(settings: Settings, users: Arc<dyn UserStore>) -> Self {
        Builder {
            settings,
            users,
            local: Arc::new(RejectingAuthenticator),
            directory: None,
        }
    }

    /// Authenticator for users that only exist locally. Only consulted by
    /// [`FallbackStrategy::Synchronized`]; rejects everybody unless set.
    pub fn local_authenticator(mut self, local: Arc<dyn Authenticator>) -> Self {
        self.local = local;
        self
    }

    /// Uses `directory` instead of connecting to the LDAP server from the settings.
    pub fn directory(mut self, directory: Arc<dyn Directory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Wires the authenticator.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`ConfigError`](loginldap_core::ErrorKind::ConfigError) if the LDAP
    /// settings are invalid.
    pub fn build(self) -> Result<WebServerAuthenticator, Error> {
        let directory: Arc<dyn Directory> = match self.directory {
            Some(directory) => directory,
            None => Arc::new(LdapDirectory::new(self.settings.ldap.clone())?),
        };

        let mut synchronizer = LdapUserSynchronizer::new(self.settings.ldap.attribute_mappings.clone(), self.users.clone());
        if let Some(domain) = &self.settings.new_user_email_suffix {
            synchronizer = synchronizer.new_user_email_suffix(domain.clone());
        }
        let synchronizer: Arc<dyn UserSynchronizer> = Arc::new(synchronizer);

        let strategy = self.settings.fallback_strategy();
        let fallback: Arc<dyn Authenticator> = match strategy {
            FallbackStrategy::Ldap => Arc::new(LdapAuthenticator::new(directory.clone(), synchronizer.clone())),
            FallbackStrategy::Synchronized => Arc::new(
                SynchronizedAuthenticator::new(directory.clone(), synchronizer.clone(), self.users.clone()).local_authenticator(self.local),
            ),
        };
        tracing::debug!(
            %strategy,
            synchronize_after_login = self.settings.synchronize_after_login,
            "Configured web server authentication"
        );

        let mut authenticator = WebServerAuthenticator::new(directory, self.users, synchronizer, fallback);
        authenticator.set_synchronize_after_login(self.settings.synchronize_after_login);
        Ok(authenticator)
    }
}

impl WebServerAuthenticator {
    /// Shorthand for [`Builder::new`] followed by [`Builder::build`].
    pub fn configured(settings: Settings, users: Arc<dyn UserStore>) -> Result<Self, Error> {
        Builder::new(settings, users).build()
    }
}
