//! [`Directory`] implementation that talks to an LDAP server.

use crate::config::LdapConfig;
use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry};
use loginldap_core::directory::{Directory, DirectoryUser};
use loginldap_core::{Error, ErrorKind};
use std::time::Duration;
use tracing::debug;

/// LDAP result code for a rejected simple bind.
const RC_INVALID_CREDENTIALS: u32 = 49;

/// [`Directory`] backed by an LDAP server.
///
/// Every call opens its own connection, binds with the configured service account and unbinds when
/// done, so one instance can be shared between concurrent requests.
#[derive(Debug, Clone)]
pub struct LdapDirectory {
    config: LdapConfig,
}

impl LdapDirectory {
    /// Creates a directory for the given, validated configuration.
    pub fn new(config: LdapConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(LdapDirectory { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &LdapConfig {
        &self.config
    }

    async fn connect(&self) -> Result<Ldap, Error> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(Duration::from_secs(self.config.timeout_seconds))
            .set_starttls(self.config.start_tls)
            .set_no_tls_verify(self.config.skip_tls_verify);

        debug!(server_url = %self.config.server_url, "Connecting to LDAP server");

        let (conn, ldap) = LdapConnAsync::with_settings(settings, &self.config.server_url)
            .await
            .map_err(|e| to_error(ErrorKind::CannotConnect, e))?;
        ldap3::drive!(conn);
        Ok(ldap)
    }

    async fn service_bind(&self, ldap: &mut Ldap) -> Result<(), Error> {
        if self.config.bind_dn.is_empty() {
            return Ok(());
        }
        ldap.simple_bind(&self.config.bind_dn, &self.config.bind_password)
            .await
            .map_err(classify)?
            .success()
            .map_err(|e| to_error(ErrorKind::DirectoryError, e))?;
        Ok(())
    }
}

#[async_trait]
impl Directory for LdapDirectory {
    #[tracing_attributes::instrument(skip(self))]
    async fn get_user(&self, login: &str) -> Result<Option<DirectoryUser>, Error> {
        let mut ldap = self.connect().await?;
        self.service_bind(&mut ldap).await?;

        let filter = self.config.build_user_filter(login);
        debug!(%filter, "Searching for user");

        let (entries, _res) = ldap
            .search(&self.config.base_dn, Scope::Subtree, &filter, self.config.attribute_mappings.requested())
            .await
            .map_err(classify)?
            .success()
            .map_err(classify)?;
        let _ = ldap.unbind().await;

        if entries.len() > 1 {
            debug!(count = entries.len(), "Filter matched several entries, using the first");
        }

        Ok(entries.into_iter().next().map(|entry| {
            let entry = SearchEntry::construct(entry);
            DirectoryUser {
                dn: entry.dn,
                attributes: entry.attrs,
            }
        }))
    }

    #[tracing_attributes::instrument(skip(self, user, password), fields(dn = %user.dn))]
    async fn verify_password(&self, user: &DirectoryUser, password: &str) -> Result<bool, Error> {
        // A simple bind with an empty password is an anonymous bind and would succeed.
        if password.is_empty() {
            return Ok(false);
        }

        let mut ldap = self.connect().await?;
        let result = ldap.simple_bind(&user.dn, password).await.map_err(classify)?;
        let _ = ldap.unbind().await;

        match result.rc {
            0 => Ok(true),
            RC_INVALID_CREDENTIALS => Ok(false),
            rc => Err(Error::new(
                ErrorKind::DirectoryError,
                format!("bind for {} failed with code {}: {}", user.dn, rc, result.text),
            )),
        }
    }
}

/// Transport failures on an established connection count as connectivity errors, everything else
/// the server said is a directory error.
fn classify(err: LdapError) -> Error {
    let kind = match &err {
        LdapError::Io { .. } | LdapError::Timeout { .. } | LdapError::EndOfStream => ErrorKind::CannotConnect,
        _ => ErrorKind::DirectoryError,
    };
    to_error(kind, err)
}

/// Keeps the transport error as source so [`Error::get_io_error`] can reach it.
fn to_error(kind: ErrorKind, err: LdapError) -> Error {
    match err {
        LdapError::Io { source } => Error::new(kind, source),
        err => Error::new(kind, err.to_string()),
    }
}
