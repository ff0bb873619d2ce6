//! Contains the settings the configured [`Builder`](crate::Builder) reads.

use derive_more::Display;
use loginldap_core::{Error, ErrorKind};
use loginldap_ldap::LdapConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

pub(crate) const DEFAULT_SYNCHRONIZE_AFTER_LOGIN: bool = true;
pub(crate) const DEFAULT_USE_LDAP_FOR_AUTHENTICATION: bool = true;

/// Which authenticator handles logins that the web server did not authenticate.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum FallbackStrategy {
    /// Direct bind against the directory, see
    /// [`LdapAuthenticator`](loginldap_ldap::LdapAuthenticator).
    #[display("ldap")]
    Ldap,
    /// Directory bind for directory users, local authentication for the rest, see
    /// [`SynchronizedAuthenticator`](loginldap_ldap::SynchronizedAuthenticator).
    #[display("synchronized")]
    Synchronized,
}

impl From<bool> for FallbackStrategy {
    /// Maps the `use_ldap_for_authentication` flag.
    fn from(use_ldap_for_authentication: bool) -> Self {
        match use_ldap_for_authentication {
            true => FallbackStrategy::Ldap,
            false => FallbackStrategy::Synchronized,
        }
    }
}

/// Configuration of the web server login and its fallback.
///
/// Example, in JSON:
///
/// ```json
/// {
///   "synchronize_after_login": true,
///   "use_ldap_for_authentication": false,
///   "new_user_email_suffix": "example.com",
///   "ldap": {
///     "server_url": "ldaps://ldap.example.com:636",
///     "bind_dn": "cn=reader,dc=example,dc=com",
///     "bind_password": "secret",
///     "base_dn": "ou=users,dc=example,dc=com",
///     "user_filter": "(&(objectClass=person)(uid={login}))"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Synchronize pre-authenticated users from the directory before logging them in.
    #[serde(default = "default_synchronize_after_login")]
    pub synchronize_after_login: bool,

    /// Use [`FallbackStrategy::Ldap`] when true, [`FallbackStrategy::Synchronized`] otherwise.
    #[serde(default = "default_use_ldap_for_authentication")]
    pub use_ldap_for_authentication: bool,

    /// Domain for made-up email addresses of directory entries without one.
    #[serde(default)]
    pub new_user_email_suffix: Option<String>,

    /// Directory connection.
    pub ldap: LdapConfig,
}

fn default_synchronize_after_login() -> bool {
    DEFAULT_SYNCHRONIZE_AFTER_LOGIN
}

fn default_use_ldap_for_authentication() -> bool {
    DEFAULT_USE_LDAP_FOR_AUTHENTICATION
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            synchronize_after_login: DEFAULT_SYNCHRONIZE_AFTER_LOGIN,
            use_ldap_for_authentication: DEFAULT_USE_LDAP_FOR_AUTHENTICATION,
            new_user_email_suffix: None,
            ldap: LdapConfig::default(),
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file.
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, Error> {
        let json = fs::read_to_string(filename).map_err(|e| Error::new(ErrorKind::ConfigError, e))?;
        Settings::from_json(json)
    }

    /// Reads settings from a JSON string.
    pub fn from_json<T: AsRef<str>>(json: T) -> Result<Self, Error> {
        serde_json::from_str(json.as_ref()).map_err(|e| Error::new(ErrorKind::ConfigError, e))
    }

    /// The fallback selected by [`use_ldap_for_authentication`](Self::use_ldap_for_authentication).
    pub fn fallback_strategy(&self) -> FallbackStrategy {
        self.use_ldap_for_authentication.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let settings = Settings::from_json(r#"{"ldap": {"server_url": "ldap://ldap:389", "base_dn": "dc=example,dc=com"}}"#).unwrap();
        assert!(settings.synchronize_after_login);
        assert_eq!(settings.fallback_strategy(), FallbackStrategy::Ldap);
        assert_eq!(settings.new_user_email_suffix, None);
    }

    #[test]
    fn flag_selects_fallback() {
        let settings = Settings::from_json(
            r#"{"use_ldap_for_authentication": false, "ldap": {"server_url": "ldap://ldap:389", "base_dn": "dc=example,dc=com"}}"#,
        )
        .unwrap();
        assert_eq!(settings.fallback_strategy(), FallbackStrategy::Synchronized);
        assert_eq!(settings.fallback_strategy().to_string(), "synchronized");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert_eq!(Settings::from_json("{").unwrap_err().kind(), ErrorKind::ConfigError);
        assert_eq!(Settings::from_file("/nonexistent/loginldap.json").unwrap_err().kind(), ErrorKind::ConfigError);
    }
}
