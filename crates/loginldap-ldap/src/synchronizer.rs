//! Creates and updates local users from LDAP entries.

use crate::config::AttributeMappings;
use async_trait::async_trait;
use loginldap_core::directory::DirectoryUser;
use loginldap_core::user::{LocalUser, UserStore, UserSynchronizer};
use loginldap_core::{Error, ErrorKind};
use std::sync::Arc;
use tracing::info;

/// [`UserSynchronizer`] that maps LDAP attributes onto [`LocalUser`] fields through the configured
/// [`AttributeMappings`].
#[derive(Debug)]
pub struct LdapUserSynchronizer {
    mappings: AttributeMappings,
    users: Arc<dyn UserStore>,
    new_user_email_suffix: Option<String>,
}

impl LdapUserSynchronizer {
    /// Creates a synchronizer writing to `users`.
    pub fn new(mappings: AttributeMappings, users: Arc<dyn UserStore>) -> Self {
        LdapUserSynchronizer {
            mappings,
            users,
            new_user_email_suffix: None,
        }
    }

    /// Domain used to make up an address (`login@domain`) for entries without an email attribute.
    /// Without it such entries fail to synchronize.
    pub fn new_user_email_suffix<S: Into<String>>(mut self, domain: S) -> Self {
        self.new_user_email_suffix = Some(domain.into());
        self
    }

    /// Builds the local user an entry corresponds to, without touching storage.
    pub fn make_local_user(&self, entry: &DirectoryUser) -> Result<LocalUser, Error> {
        let login = entry.get_attribute(&self.mappings.login).filter(|l| !l.is_empty()).ok_or_else(|| {
            Error::new(
                ErrorKind::SyncError,
                format!("entry {} has no '{}' attribute", entry.dn, self.mappings.login),
            )
        })?;

        let email = match (entry.get_attribute(&self.mappings.email), &self.new_user_email_suffix) {
            (Some(email), _) => email.to_string(),
            (None, Some(domain)) => format!("{}@{}", login, domain),
            (None, None) => {
                return Err(Error::new(
                    ErrorKind::SyncError,
                    format!("entry {} has no '{}' attribute", entry.dn, self.mappings.email),
                ));
            }
        };

        Ok(LocalUser {
            login: login.to_string(),
            email,
            alias: entry.get_attribute(&self.mappings.alias).unwrap_or(login).to_string(),
            superuser: false,
            directory_managed: true,
        })
    }
}

#[async_trait]
impl UserSynchronizer for LdapUserSynchronizer {
    #[tracing_attributes::instrument(skip(self, entry), fields(dn = %entry.dn))]
    async fn synchronize(&self, entry: &DirectoryUser) -> Result<LocalUser, Error> {
        let mut user = self.make_local_user(entry)?;

        match self.users.get_user(&user.login).await? {
            Some(existing) => {
                user.superuser = existing.superuser;
                if existing != user {
                    info!(login = %user.login, "Updating local user from directory");
                    self.users.save_user(user.clone()).await?;
                }
            }
            None => {
                info!(login = %user.login, "Creating local user from directory");
                self.users.save_user(user.clone()).await?;
            }
        }

        Ok(user)
    }
}
